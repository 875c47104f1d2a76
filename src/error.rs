/// Errors raised by [`TreeView`](crate::TreeView) queries.
///
/// Queries that can come back empty-handed on a non-empty tree (such as
/// [`floor`](crate::TreeView::floor) below the minimum) return `Ok(None)`
/// rather than an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum Error {
    /// The query needs at least one element.
    #[error("called `{operation}()` on an empty tree")]
    EmptyTree {
        /// Name of the rejected query.
        operation: &'static str,
    },

    /// A rank passed to a selection query is not below the tree's length.
    #[error("rank {rank} is out of range for a tree of {len} elements")]
    RankOutOfRange {
        /// The rejected rank.
        rank: usize,
        /// Number of logical elements in the tree.
        len: usize,
    },
}

/// Shorthand for results of fallible queries.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_failure() {
        let empty = Error::EmptyTree { operation: "min" };
        assert_eq!(empty.to_string(), "called `min()` on an empty tree");

        let range = Error::RankOutOfRange { rank: 5, len: 5 };
        assert_eq!(range.to_string(), "rank 5 is out of range for a tree of 5 elements");
    }
}
