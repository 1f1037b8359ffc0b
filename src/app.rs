use crate::{
    common::{error::LedgerError, money::Money},
    domain::{
        account::{Account, AccountKind},
        ledger::AccountLedger,
    },
    store::Store,
};

/// Demo flow: open the database (path from argv[1], default `bank_app.db`),
/// create the schema, run a deposit and a withdrawal against one savings
/// account, persist a second one, and print the transaction listing.
pub fn run<I, S>(args: I) -> Result<(), LedgerError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    let db_path = args.get(1).map(String::as_str).unwrap_or("bank_app.db");

    let mut store = Store::open(db_path)?;
    store.create_tables()?;

    let account = Account::new("ET1", "user_01", AccountKind::Savings, Money::from_major(200));
    let mut ledger = AccountLedger::new(&mut store, account);
    ledger.save()?;

    let amount = Money::from_major(50);
    let balance = ledger.deposit(amount)?;
    println!("Deposited {amount}. Current balance: {balance}");

    let amount = Money::from_major(30);
    let balance = ledger.withdraw(amount)?;
    println!("Withdrew {amount}. Current balance: {balance}");

    ledger.save()?;
    println!("{}", ledger.show_transactions());
    drop(ledger);

    let account = Account::new("RT01", "user_02", AccountKind::Savings, Money::from_major(120));
    AccountLedger::new(&mut store, account).save()?;

    Ok(())
}
