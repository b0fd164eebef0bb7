use std::path::{Path, PathBuf};
use std::rc::Rc;

use aebridge::desc::{Api, Descriptor, DescriptorOps, HeapApi, Value, ValueOptions, open_flat};
use clap::Parser;

type DynError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser, Debug)]
#[command(name = "aebridge_dump")]
#[command(about = "Print a flattened descriptor stream as JSON")]
struct Args {
	/// Flat stream to read.
	path: PathBuf,
	/// Coerce the root descriptor to this four-character type before printing.
	#[arg(long = "as", value_name = "TYPE")]
	as_type: Option<String>,
	/// Maximum container nesting to expand.
	#[arg(long, default_value_t = ValueOptions::default().max_depth)]
	max_depth: u32,
	/// Maximum items expanded from one container.
	#[arg(long, default_value_t = ValueOptions::default().max_items)]
	max_items: usize,
	/// Print text payloads as byte arrays.
	#[arg(long)]
	raw_text: bool,
	/// Pretty-print the JSON output.
	#[arg(long)]
	pretty: bool,
}

impl Args {
	fn value_options(&self) -> ValueOptions {
		ValueOptions {
			max_depth: self.max_depth,
			max_items: self.max_items,
			decode_text: !self.raw_text,
		}
	}
}

#[derive(serde::Serialize)]
struct DumpJson {
	path: String,
	root_type: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	coerced_to: Option<String>,
	nodes: usize,
	value: Value,
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")))
		.with_writer(std::io::stderr)
		.init();

	if let Err(err) = run(Args::parse()) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(args: Args) -> Result<(), DynError> {
	println!("{}", render(&args)?);
	Ok(())
}

fn render(args: &Args) -> Result<String, DynError> {
	let payload = dump(&args.path, args.as_type.as_deref(), &args.value_options())?;
	let text = if args.pretty {
		serde_json::to_string_pretty(&payload)?
	} else {
		serde_json::to_string(&payload)?
	};
	Ok(text)
}

fn dump(path: &Path, as_type: Option<&str>, opt: &ValueOptions) -> Result<DumpJson, DynError> {
	let tree = open_flat(path)?;
	let nodes = tree.node_count();
	tracing::debug!(nodes, root = %tree.descriptor_type, "loaded descriptor tree");

	let heap = Rc::new(HeapApi::new());
	let api: Api = heap.clone();
	let root = Descriptor::from_raw(api, heap.insert(tree));
	let root_type = root.type_name()?;

	let (root, coerced_to) = match as_type {
		Some(name) => {
			let coerced = root.coerce_to(name)?;
			drop(root);
			let name = coerced.type_name()?;
			(coerced, Some(name))
		}
		None => (root, None),
	};

	let value = root.into_value(opt)?;
	if heap.live_count() != 0 {
		tracing::warn!(live = heap.live_count(), "descriptors still live after snapshot");
	}

	Ok(DumpJson {
		path: path.display().to_string(),
		root_type,
		coerced_to,
		nodes,
		value,
	})
}
