use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PASSWORD: &str = "correct horse battery staple";

fn moneyplan(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("moneyplan").expect("binary exists");
    cmd.env("MONEYPLAN_DATA_DIR", data_dir.path());
    cmd
}

fn signup(data_dir: &TempDir, email: &str) {
    moneyplan(data_dir)
        .args(["signup", email])
        .env("MONEYPLAN_PASSWORD", PASSWORD)
        .assert()
        .success();
}

fn create_plan(data_dir: &TempDir, name: &str, total: &str, modules: &[&str]) {
    let mut cmd = moneyplan(data_dir);
    cmd.args(["plan", "create", name, total]);
    for spec in modules {
        cmd.args(["--module", spec]);
    }
    cmd.assert().success();
}

#[test]
fn signup_creates_account_and_signs_in() {
    let data_dir = TempDir::new().unwrap();

    moneyplan(&data_dir)
        .args(["signup", "kim@example.com"])
        .env("MONEYPLAN_PASSWORD", PASSWORD)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Account created: kim@example.com")
                .and(predicate::str::contains("now signed in")),
        );

    moneyplan(&data_dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as kim@example.com"));
}

#[test]
fn signup_rejects_duplicate_email() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");

    moneyplan(&data_dir)
        .args(["signup", "KIM@example.com"])
        .env("MONEYPLAN_PASSWORD", "another password")
        .assert()
        .failure()
        .stderr(predicate::str::contains("User already exists"));
}

#[test]
fn signin_rejects_wrong_password() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");

    moneyplan(&data_dir)
        .args(["signin", "kim@example.com"])
        .env("MONEYPLAN_PASSWORD", "not the password")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email or password"));
}

#[test]
fn signout_ends_the_session() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");

    moneyplan(&data_dir)
        .arg("signout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out kim@example.com"));

    moneyplan(&data_dir)
        .args(["plan", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[test]
fn plan_create_allocates_by_percentage() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");

    moneyplan(&data_dir)
        .args([
            "plan", "create", "June", "1000", "--module", "Food:60", "--module", "Rent:40",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Created plan: June")
                .and(predicate::str::contains("$600.00"))
                .and(predicate::str::contains("$400.00")),
        );

    moneyplan(&data_dir)
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("June").and(predicate::str::contains("$1000.00")));
}

#[test]
fn plan_create_rejects_bad_percentage_sum() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");

    moneyplan(&data_dir)
        .args([
            "plan", "create", "June", "1000", "--module", "Food:60", "--module", "Rent:30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Total percentage must be 100%"));
}

#[test]
fn expense_moves_module_and_plan_balances() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");
    create_plan(&data_dir, "June", "1000", &["Food:60", "Rent:40"]);

    moneyplan(&data_dir)
        .args([
            "txn",
            "expense",
            "June",
            "Food",
            "Groceries",
            "100",
            "--date",
            "2025-06-01",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Recorded expense")
                .and(predicate::str::contains("balance $500.00"))
                .and(predicate::str::contains("Plan total: $900.00")),
        );
}

#[test]
fn overspend_is_rejected_and_state_unchanged() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");
    create_plan(&data_dir, "June", "1000", &["Food:60", "Rent:40"]);

    moneyplan(&data_dir)
        .args(["txn", "expense", "June", "Food", "Splurge", "700"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Insufficient funds in module 'Food'"));

    moneyplan(&data_dir)
        .args(["plan", "show", "June"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$600.00").and(predicate::str::contains("$1000.00")));
}

#[test]
fn module_edit_applies_delta_to_balances() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");
    create_plan(&data_dir, "June", "1000", &["Food:60", "Rent:40"]);

    moneyplan(&data_dir)
        .args([
            "txn",
            "expense",
            "June",
            "Food",
            "Groceries",
            "100",
            "--date",
            "2025-06-01",
        ])
        .assert()
        .success();

    // Plan total is 900 now; raising Rent 40 -> 50 adds 900*10/100 = 90
    moneyplan(&data_dir)
        .args(["module", "edit", "June", "Rent", "--percentage", "50"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("$490.00")
                .and(predicate::str::contains("percentages now sum to 110%")),
        );
}

#[test]
fn module_delete_shrinks_plan_total() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");
    create_plan(&data_dir, "June", "1000", &["Food:60", "Rent:40"]);

    moneyplan(&data_dir)
        .args(["module", "delete", "June", "Rent", "--yes"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Deleted module 'Rent'")
                .and(predicate::str::contains("Plan total: $600.00")),
        );
}

#[test]
fn wizard_creates_plan_from_stdin() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");

    moneyplan(&data_dir)
        .args(["plan", "wizard"])
        .write_stdin("Vacation\n2000\n2\nFlights:50\nHotel:50\nyes\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Created plan: Vacation")
                .and(predicate::str::contains("$1000.00")),
        );
}

#[test]
fn wizard_cancel_saves_nothing() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");

    moneyplan(&data_dir)
        .args(["plan", "wizard"])
        .write_stdin("Vacation\n2000\n1\nAll:100\nno\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wizard cancelled"));

    moneyplan(&data_dir)
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found"));
}

#[test]
fn txn_list_filters_by_search() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");
    create_plan(&data_dir, "June", "1000", &["Food:100"]);

    moneyplan(&data_dir)
        .args([
            "txn",
            "expense",
            "June",
            "Food",
            "Groceries",
            "50",
            "--date",
            "2025-06-01",
        ])
        .assert()
        .success();
    moneyplan(&data_dir)
        .args([
            "txn", "income", "June", "Food", "Refund", "20", "--date", "2025-06-02",
        ])
        .assert()
        .success();

    moneyplan(&data_dir)
        .args(["txn", "list", "June", "--search", "refund"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Refund").and(predicate::str::contains("Groceries").not()),
        );
}

#[test]
fn export_csv_writes_transaction_rows() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");
    create_plan(&data_dir, "June", "1000", &["Food:100"]);

    moneyplan(&data_dir)
        .args([
            "txn",
            "expense",
            "June",
            "Food",
            "Groceries",
            "50",
            "--date",
            "2025-06-01",
        ])
        .assert()
        .success();

    moneyplan(&data_dir)
        .args(["export", "csv", "June"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("plan,module,type,title,amount,date,description")
                .and(predicate::str::contains(
                    "June,Food,expense,Groceries,50.00,2025-06-01,",
                )),
        );
}

#[test]
fn plans_are_partitioned_per_user() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");
    create_plan(&data_dir, "June", "1000", &["Food:100"]);

    signup(&data_dir, "sam@example.com");

    moneyplan(&data_dir)
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found"));

    moneyplan(&data_dir)
        .args(["signin", "kim@example.com"])
        .env("MONEYPLAN_PASSWORD", PASSWORD)
        .assert()
        .success();

    moneyplan(&data_dir)
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("June"));
}

#[test]
fn reset_deletes_all_plans() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");
    create_plan(&data_dir, "June", "1000", &["Food:100"]);
    create_plan(&data_dir, "July", "500", &["Rent:100"]);

    moneyplan(&data_dir)
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 plans"));

    moneyplan(&data_dir)
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found"));
}

#[test]
fn report_day_lists_matching_transactions() {
    let data_dir = TempDir::new().unwrap();
    signup(&data_dir, "kim@example.com");
    create_plan(&data_dir, "June", "1000", &["Food:100"]);

    moneyplan(&data_dir)
        .args([
            "txn",
            "expense",
            "June",
            "Food",
            "Groceries",
            "50",
            "--date",
            "2025-06-01",
        ])
        .assert()
        .success();
    moneyplan(&data_dir)
        .args([
            "txn", "expense", "June", "Food", "Coffee", "5", "--date", "2025-06-02",
        ])
        .assert()
        .success();

    moneyplan(&data_dir)
        .args(["report", "day", "2025-06-01"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Groceries").and(predicate::str::contains("Coffee").not()),
        );
}
