use crate::desc::codes::ERR_AE_COERCION_FAIL;
use crate::desc::native::{DescTree, NativeResult, TreeBody};
use crate::desc::{FourCharCode, Scalar};

/// Convert `tree` into an equivalent tree of type `to`.
///
/// Same-type and wildcard requests copy. Scalars convert between numeric,
/// boolean, text, and code encodings. Any data node wraps into a one-item
/// list, and a one-item list unwraps into its item's coercion. Lists and
/// records stored under a custom type code coerce back to the plain container
/// type.
pub(super) fn coerce_tree(tree: &DescTree, to: FourCharCode) -> NativeResult<DescTree> {
	if to == FourCharCode::WILDCARD || tree.descriptor_type == to {
		return Ok(tree.clone());
	}

	match &tree.body {
		TreeBody::List(_) if to == FourCharCode::LIST => Ok(relabel(tree, to)),
		TreeBody::Record(_) if to == FourCharCode::RECORD => Ok(relabel(tree, to)),
		TreeBody::List(items) => match items.as_slice() {
			[single] => coerce_tree(single, to),
			_ => Err(ERR_AE_COERCION_FAIL),
		},
		TreeBody::Record(_) | TreeBody::Message { .. } => Err(ERR_AE_COERCION_FAIL),
		TreeBody::Data(bytes) => {
			if to == FourCharCode::LIST {
				return Ok(DescTree::list(vec![tree.clone()]));
			}
			let scalar = Scalar::decode(tree.descriptor_type, bytes).ok_or(ERR_AE_COERCION_FAIL)?;
			let out = scalar.encode(to).ok_or(ERR_AE_COERCION_FAIL)?;
			Ok(DescTree::data(to, out))
		}
	}
}

fn relabel(tree: &DescTree, to: FourCharCode) -> DescTree {
	DescTree {
		descriptor_type: to,
		body: tree.body.clone(),
	}
}
