#![no_main]

use libfuzzer_sys::fuzz_target;
use webcache::{EntryId, RecencyList};

// Fuzz arbitrary operation sequences on RecencyList
//
// Random push_front / move_to_front / pop_back / remove sequences, including
// stale ids after removal, validating link symmetry after every step.
fuzz_target!(|data: &[u8]| {
    let mut list: RecencyList<u8> = RecencyList::new();
    let mut ids: Vec<EntryId> = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 4;
        let arg = data[idx + 1];

        match op {
            0 => {
                ids.push(list.push_front(arg));
            }
            1 => {
                if !ids.is_empty() {
                    let id = ids[arg as usize % ids.len()];
                    // stale ids must be rejected, live ids accepted
                    assert_eq!(list.move_to_front(id), list.contains(id));
                }
            }
            2 => {
                let before = list.len();
                let popped = list.pop_back();
                assert_eq!(popped.is_some(), before > 0);
            }
            3 => {
                if !ids.is_empty() {
                    let id = ids[arg as usize % ids.len()];
                    let was_live = list.contains(id);
                    assert_eq!(list.remove(id).is_some(), was_live);
                    assert!(!list.contains(id));
                }
            }
            _ => unreachable!(),
        }

        list.debug_validate();
        idx += 2;
    }
});
