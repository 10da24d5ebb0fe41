//! Economy service integration tests
//! Run with: cargo test --test economy_test

use std::sync::Arc;

use vault_bot::application::services::economy_service::{AccountDefaults, EconomyService};
use vault_bot::domain::entities::{Balance, TransferOutcome};
use vault_bot::infrastructure::database::SqliteLedger;

fn service() -> EconomyService {
    let ledger = Arc::new(SqliteLedger::new(":memory:").expect("in-memory ledger"));
    EconomyService::new(ledger, AccountDefaults::default())
}

fn service_with_ledger() -> (EconomyService, Arc<SqliteLedger>) {
    let ledger = Arc::new(SqliteLedger::new(":memory:").expect("in-memory ledger"));
    (EconomyService::new(ledger.clone(), AccountDefaults::default()), ledger)
}

#[tokio::test]
async fn first_inquiry_creates_default_account() {
    use vault_bot::domain::traits::Ledger;

    let (economy, ledger) = service_with_ledger();

    assert!(!ledger.exists(7).await.unwrap());
    let balance = economy.get_balance(7).await.unwrap();
    assert_eq!(balance, Balance::new(100, 0));
    assert_eq!(balance.net_worth, 100);
    assert!(ledger.exists(7).await.unwrap());
}

#[tokio::test]
async fn inquiry_is_idempotent() {
    let economy = service();
    let first = economy.get_balance(7).await.unwrap();
    let second = economy.get_balance(7).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn net_worth_always_sums_wallet_and_vault() {
    let economy = service();
    economy.get_balance(7).await.unwrap();
    economy.move_to_vault(7, 33).await.unwrap();
    economy.set_balance(8, 12, 34).await.unwrap();

    for id in [7, 8] {
        let b = economy.get_balance(id).await.unwrap();
        assert_eq!(b.wallet + b.vault, b.net_worth);
    }
}

#[tokio::test]
async fn deposit_moves_funds_and_conserves_net_worth() {
    let economy = service();
    let before = economy.get_balance(7).await.unwrap();

    let outcome = economy.move_to_vault(7, 30).await.unwrap();
    assert!(outcome.is_completed());

    let after = economy.get_balance(7).await.unwrap();
    assert_eq!(after.wallet, before.wallet - 30);
    assert_eq!(after.vault, before.vault + 30);
    assert_eq!(after.net_worth, before.net_worth);
}

#[tokio::test]
async fn overdraft_deposit_is_rejected_with_current_balance() {
    let economy = service();
    economy.get_balance(7).await.unwrap();

    let outcome = economy.move_to_vault(7, 1000).await.unwrap();
    match outcome {
        TransferOutcome::Insufficient(balance) => assert_eq!(balance, Balance::new(100, 0)),
        TransferOutcome::Completed => panic!("overdraft should not complete"),
    }

    // State unchanged
    assert_eq!(economy.get_balance(7).await.unwrap(), Balance::new(100, 0));
}

#[tokio::test]
async fn withdraw_mirrors_deposit() {
    let economy = service();
    economy.move_to_vault(7, 40).await.unwrap();

    // More than the vault holds: rejected, unchanged
    match economy.move_to_wallet(7, 41).await.unwrap() {
        TransferOutcome::Insufficient(balance) => assert_eq!(balance, Balance::new(60, 40)),
        TransferOutcome::Completed => panic!("overdraft should not complete"),
    }

    assert!(economy.move_to_wallet(7, 40).await.unwrap().is_completed());
    assert_eq!(economy.get_balance(7).await.unwrap(), Balance::new(100, 0));
}

#[tokio::test]
async fn transfer_against_fresh_account_creates_it_first() {
    let economy = service();
    // No prior inquiry: first touch is the deposit itself
    assert!(economy.move_to_vault(9, 30).await.unwrap().is_completed());
    assert_eq!(economy.get_balance(9).await.unwrap(), Balance::new(70, 30));
}

#[tokio::test]
async fn set_balance_overwrites_and_creates() {
    let economy = service();

    // Creates a missing account, then overwrites both fields
    economy.set_balance(5, 7, 11).await.unwrap();
    assert_eq!(economy.get_balance(5).await.unwrap(), Balance::new(7, 11));

    economy.set_balance(5, 0, 0).await.unwrap();
    assert_eq!(economy.get_balance(5).await.unwrap(), Balance::new(0, 0));
}

#[tokio::test]
async fn configured_defaults_apply_to_new_accounts() {
    let ledger = Arc::new(SqliteLedger::new(":memory:").expect("in-memory ledger"));
    let economy = EconomyService::new(ledger, AccountDefaults { wallet: 250, vault: 50 });
    assert_eq!(economy.get_balance(1).await.unwrap(), Balance::new(250, 50));
}

/// The walkthrough from the original bot: new user 42 deposits 30, fails to
/// deposit 1000, withdraws 30 back.
#[tokio::test]
async fn full_user_scenario() {
    let economy = service();

    assert_eq!(economy.get_balance(42).await.unwrap(), Balance::new(100, 0));

    assert!(economy.move_to_vault(42, 30).await.unwrap().is_completed());
    assert_eq!(economy.get_balance(42).await.unwrap(), Balance::new(70, 30));

    match economy.move_to_vault(42, 1000).await.unwrap() {
        TransferOutcome::Insufficient(balance) => assert_eq!(balance, Balance::new(70, 30)),
        TransferOutcome::Completed => panic!("overdraft should not complete"),
    }
    assert_eq!(economy.get_balance(42).await.unwrap(), Balance::new(70, 30));

    assert!(economy.move_to_wallet(42, 30).await.unwrap().is_completed());
    assert_eq!(economy.get_balance(42).await.unwrap(), Balance::new(100, 0));
}

/// Racing transfers may be refused, but never lose an update or break
/// conservation: the debit and credit are one guarded statement.
#[tokio::test]
async fn concurrent_transfers_conserve_net_worth() {
    let economy = Arc::new(service());
    economy.get_balance(42).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..50 {
        let economy = economy.clone();
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                economy.move_to_vault(42, 3).await
            } else {
                economy.move_to_wallet(42, 2).await
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let balance = economy.get_balance(42).await.unwrap();
    assert!(balance.wallet >= 0);
    assert!(balance.vault >= 0);
    assert_eq!(balance.net_worth, 100);
}
