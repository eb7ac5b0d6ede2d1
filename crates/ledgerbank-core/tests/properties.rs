//! Property tests for balance arithmetic and store persistence.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use ledgerbank_core::{Account, AccountStore, AmountRejection, Error};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Amounts in cents, up to ten million.
fn cents() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000).prop_map(|c| Decimal::new(c, 2))
}

fn non_positive() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..=0).prop_map(|c| Decimal::new(c, 2))
}

fn funded(balance: Decimal) -> Account {
    let mut account = Account::new("alice", "pw1");
    if balance > Decimal::ZERO {
        account.deposit(balance).unwrap();
    }
    account
}

proptest! {
    #[test]
    fn deposit_adds_exactly(start in cents(), amount in cents()) {
        let mut account = funded(start);
        account.deposit(amount).unwrap();
        prop_assert_eq!(account.balance(), start + amount);
    }

    #[test]
    fn deposit_rejects_non_positive(start in cents(), amount in non_positive()) {
        let mut account = funded(start);
        let err = account.deposit(amount).unwrap_err();
        prop_assert!(matches!(err, Error::InvalidAmount(AmountRejection::NotPositive)));
        prop_assert_eq!(account.balance(), start);
    }

    #[test]
    fn withdraw_within_balance_subtracts_exactly(
        (start_cents, amount_cents) in (1i64..1_000_000_000).prop_flat_map(|s| (Just(s), 1..=s))
    ) {
        let start = Decimal::new(start_cents, 2);
        let amount = Decimal::new(amount_cents, 2);

        let mut account = funded(start);
        account.withdraw(amount).unwrap();
        prop_assert_eq!(account.balance(), start - amount);
        prop_assert!(account.balance() >= Decimal::ZERO);
    }

    #[test]
    fn withdraw_over_balance_is_rejected(start in cents(), extra in cents()) {
        let mut account = funded(start);
        let err = account.withdraw(start + extra).unwrap_err();
        prop_assert!(matches!(err, Error::InvalidAmount(AmountRejection::InsufficientFunds)));
        prop_assert_eq!(account.balance(), start);
    }

    #[test]
    fn withdraw_rejects_non_positive(start in cents(), amount in non_positive()) {
        let mut account = funded(start);
        prop_assert!(account.withdraw(amount).is_err());
        prop_assert_eq!(account.balance(), start);
    }

    #[test]
    fn authenticate_matches_only_own_password(password in ".{0,16}", other in ".{0,16}") {
        let account = Account::new("alice", password.clone());
        prop_assert!(account.authenticate(&password));
        prop_assert!(account.authenticate(&password));
        prop_assert_eq!(account.authenticate(&other), other == password);
    }

    #[test]
    fn persist_then_restore_reproduces_registry(
        entries in prop::collection::btree_map("[a-z]{1,8}", ("[ -~]{0,12}", 0i64..10_000_000), 1..8)
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");

        let mut store = AccountStore::open(&path);
        for (username, (password, balance_cents)) in &entries {
            store.create(username, password).unwrap();
            if *balance_cents > 0 {
                store
                    .login(username, password)
                    .unwrap()
                    .deposit(Decimal::new(*balance_cents, 2))
                    .unwrap();
            }
        }
        store.persist().unwrap();

        let mut restored = AccountStore::open(&path);
        let expected: Vec<&str> = entries.keys().map(String::as_str).collect();
        prop_assert_eq!(restored.usernames(), expected);

        let mut balances = BTreeMap::new();
        for (username, (password, _)) in &entries {
            let account = restored.login(username, password).unwrap();
            balances.insert(username.clone(), account.balance());
        }
        for (username, (_, balance_cents)) in &entries {
            prop_assert_eq!(balances[username], Decimal::new(*balance_cents, 2));
            prop_assert_eq!(restored.get(username), store.get(username));
        }
    }

    #[test]
    fn second_create_never_overwrites(username in "[a-z]{1,8}", first in "[a-z]{1,8}", second in "[a-z]{1,8}") {
        let mut store = AccountStore::in_memory();
        store.create(&username, &first).unwrap();
        let err = store.create(&username, &second).unwrap_err();

        prop_assert!(matches!(err, Error::AlreadyExists(_)));
        prop_assert!(store.get(&username).unwrap().authenticate(&first));
        prop_assert_eq!(store.len(), 1);
    }
}
