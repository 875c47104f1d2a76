mod arena;
mod handle;
mod node;
mod raw_avl_tree;

pub use raw_avl_tree::AvlNodeRef;
pub(crate) use raw_avl_tree::RawAvlTree;
