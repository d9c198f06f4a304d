use crate::crypto::{blake2b_hash_with_domain, DOM_DEV_ACCOUNT};
use crate::types::Address;

/// Deterministic development account list; `dev_accounts(n)[0]` is the
/// conventional deployer
pub fn dev_accounts(count: usize) -> Vec<Address> {
    (0..count as u64)
        .filter_map(|i| {
            let hash = blake2b_hash_with_domain(DOM_DEV_ACCOUNT, &i.to_le_bytes());
            Address::from_slice_prefix(&hash)
        })
        .collect()
}

/// Swap-and-pop removal; returns the element that moved into `index`, if any
pub fn swap_remove_tracked<T: Copy>(vec: &mut Vec<T>, index: usize) -> Option<T> {
    vec.swap_remove(index);
    vec.get(index).copied()
}
