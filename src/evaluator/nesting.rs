//! Flatten/restore for nested reference lists.
//!
//! The parser and encoder seams take flat batches, but references arrive as
//! one list per candidate. [`flatten`] records each sublist's length while
//! building the flat arena; [`restore`] cuts the processed arena back into
//! sublists from those lengths. The round trip is lossless and
//! order-preserving: `restore(flatten(x))` reproduces `x` exactly.

/// Flattens a nested list into one arena plus the sublist lengths needed to
/// undo it.
pub fn flatten<T: Clone>(nested: &[Vec<T>]) -> (Vec<T>, Vec<usize>) {
    let total = nested.iter().map(Vec::len).sum();

    let mut flat = Vec::with_capacity(total);
    let mut lengths = Vec::with_capacity(nested.len());

    for sublist in nested {
        flat.extend(sublist.iter().cloned());
        lengths.push(sublist.len());
    }

    (flat, lengths)
}

/// Rebuilds the nested structure from a flat arena and the recorded sublist
/// lengths.
///
/// `flat.len()` must equal the sum of `lengths`; [`flatten`] guarantees this
/// for its own output.
pub fn restore<T>(flat: Vec<T>, lengths: &[usize]) -> Vec<Vec<T>> {
    debug_assert_eq!(flat.len(), lengths.iter().sum::<usize>());

    let mut nested = Vec::with_capacity(lengths.len());
    let mut items = flat.into_iter();

    for &length in lengths {
        nested.push(items.by_ref().take(length).collect());
    }

    nested
}
