/// One entry of the slot table, indexed by handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    /// The handle is issued and its record lives at this storage position.
    Occupied { position: u32 },
    /// The handle is on the free list. `next` is the following free handle index, if any.
    Free { next: Option<u32> },
}

impl Slot {
    pub fn position(self) -> Option<u32> {
        match self {
            Slot::Occupied { position } => Some(position),
            Slot::Free { .. } => None,
        }
    }
}

/// Allocate a slot table with `capacity` entries, all free. See `seed`.
pub fn new_table(capacity: usize) -> (Box<[Slot]>, Option<u32>) {
    let mut table = vec![Slot::Free { next: None }; capacity].into_boxed_slice();
    let head = seed(&mut table);
    (table, head)
}

/// Mark every entry free, chained in ascending order, and return the head of that chain. The
/// first inserts into a freshly seeded table hand out indexes 0, 1, 2, ...
pub fn seed(table: &mut [Slot]) -> Option<u32> {
    let len = table.len() as u32;
    for (index, slot) in (0..len).zip(table.iter_mut()) {
        let next = index + 1;
        *slot = Slot::Free {
            next: if next < len { Some(next) } else { None },
        };
    }
    if len > 0 {
        Some(0)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_table() {
        let (table, head) = new_table(3);
        assert_eq!(
            &*table,
            [
                Slot::Free { next: Some(1) },
                Slot::Free { next: Some(2) },
                Slot::Free { next: None },
            ]
        );
        assert_eq!(head, Some(0));

        let (table, head) = new_table(0);
        assert!(table.is_empty());
        assert_eq!(head, None);
    }

    #[test]
    fn test_reseed_overwrites_occupied() {
        let mut table = [
            Slot::Occupied { position: 1 },
            Slot::Free { next: None },
            Slot::Occupied { position: 0 },
        ];
        assert_eq!(seed(&mut table), Some(0));
        assert_eq!(table[0], Slot::Free { next: Some(1) });
        assert_eq!(table[2], Slot::Free { next: None });
    }

    #[test]
    fn test_position() {
        assert_eq!(Slot::Occupied { position: 4 }.position(), Some(4));
        assert_eq!(Slot::Free { next: Some(4) }.position(), None);
    }
}
