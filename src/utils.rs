use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShiftError {
    #[error("cannot move index {source_idx} to {target_idx} in a list of length {len}")]
    OutOfBounds {
        source_idx: usize,
        target_idx: usize,
        len: usize,
    },
}

/// Removes the value at `source_idx` and reinserts it at `target_idx` of the same vec. Both
/// indices refer to the vec before the removal, so moving 1 to 3 shifts the values at 2 and 3
/// left by one. Does nothing if `source_idx` equals `target_idx`.
pub fn shift_vec<T>(
    source_idx: usize,
    target_idx: usize,
    vec: &mut Vec<T>,
) -> Result<(), ShiftError> {
    let len = vec.len();
    if source_idx >= len || target_idx >= len {
        return Err(ShiftError::OutOfBounds {
            source_idx,
            target_idx,
            len,
        });
    }
    if source_idx == target_idx {
        return Ok(());
    }

    let item = vec.remove(source_idx);
    vec.insert(target_idx, item);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_forward_shifting_intermediates_left() {
        let mut v = vec!['a', 'b', 'c', 'd', 'e', 'f'];
        shift_vec(1, 3, &mut v).unwrap();
        assert_eq!(v, vec!['a', 'c', 'd', 'b', 'e', 'f']);
    }

    #[test]
    fn moves_backward() {
        let mut v = vec!['a', 'b', 'c', 'd', 'e', 'f'];
        shift_vec(4, 1, &mut v).unwrap();
        assert_eq!(v, vec!['a', 'e', 'b', 'c', 'd', 'f']);
    }

    #[test]
    fn last_index_is_a_valid_target() {
        let mut v = vec![1, 2, 3];
        shift_vec(0, 2, &mut v).unwrap();
        assert_eq!(v, vec![2, 3, 1]);
    }

    #[test]
    fn rejects_out_of_range_without_touching_vec() {
        let mut v = vec![1, 2, 3];
        assert_eq!(
            shift_vec(3, 0, &mut v),
            Err(ShiftError::OutOfBounds {
                source_idx: 3,
                target_idx: 0,
                len: 3
            })
        );
        assert!(shift_vec(0, 3, &mut v).is_err());
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn same_index_is_noop() {
        let mut v = vec![1, 2, 3];
        shift_vec(1, 1, &mut v).unwrap();
        assert_eq!(v, vec![1, 2, 3]);
    }
}
