mod support;

use serde_json::Value;

use support::TestHome;

fn json_output(home: &TestHome, args: &[&str]) -> Value {
    let output = home
        .cmd()
        .args(args)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("json envelope")
}

#[test]
fn add_creates_a_clean_record() {
    let home = TestHome::new();

    let before = home.read_habits().len();
    let value = json_output(
        &home,
        &[
            "add",
            "Read for 20 minutes",
            "--category",
            "learning",
            "--frequency",
            "daily",
        ],
    );

    assert_eq!(value["schema_version"], "habit.v1");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["habit"]["streak"], 0);
    assert_eq!(value["data"]["habit"]["completedToday"], false);
    assert_eq!(value["data"]["habit"]["category"], "learning");

    let habits = home.read_habits();
    assert_eq!(habits.len(), before + 1);
}

#[test]
fn add_rejects_blank_name() {
    let home = TestHome::new();
    home.cmd()
        .args(["add", "   "])
        .assert()
        .failure()
        .code(2);
    assert!(home.read_habits().is_empty());
}

#[test]
fn done_unknown_id_fails_with_user_error() {
    let home = TestHome::new();
    let output = home
        .cmd()
        .args(["done", "9999", "--json"])
        .assert()
        .failure()
        .code(2)
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("error envelope");
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["kind"], "user_error");
    assert_eq!(value["error"]["details"]["habit_id"], 9999);
}

#[test]
fn done_toggles_streak_both_ways() {
    let home = TestHome::new();
    let value = json_output(&home, &["add", "Read"]);
    let id = value["data"]["habit"]["id"].as_i64().expect("id").to_string();

    let value = json_output(&home, &["done", &id]);
    assert_eq!(value["data"]["completed"], true);
    assert_eq!(value["data"]["habit"]["streak"], 1);

    let value = json_output(&home, &["done", &id]);
    assert_eq!(value["data"]["completed"], false);
    assert_eq!(value["data"]["habit"]["streak"], 0);
}

#[test]
fn edit_changes_fields_but_not_streak() {
    let home = TestHome::new();
    let value = json_output(&home, &["add", "Read"]);
    let id = value["data"]["habit"]["id"].as_i64().expect("id").to_string();
    json_output(&home, &["done", &id]);

    let value = json_output(
        &home,
        &["edit", &id, "--name", "Read more", "--category", "learning"],
    );
    assert_eq!(value["data"]["habit"]["name"], "Read more");
    assert_eq!(value["data"]["habit"]["streak"], 1);
    assert_eq!(value["data"]["habit"]["completedToday"], true);
}

#[test]
fn edit_requires_at_least_one_field() {
    let home = TestHome::new();
    let value = json_output(&home, &["add", "Read"]);
    let id = value["data"]["habit"]["id"].as_i64().expect("id").to_string();

    home.cmd().args(["edit", &id]).assert().failure().code(2);
}

#[test]
fn rm_removes_the_habit() {
    let home = TestHome::new();
    let value = json_output(&home, &["add", "Read"]);
    let id = value["data"]["habit"]["id"].as_i64().expect("id").to_string();

    json_output(&home, &["rm", &id]);
    assert!(home.read_habits().is_empty());

    home.cmd().args(["rm", &id]).assert().failure().code(2);
}

#[test]
fn list_filters_by_category() {
    let home = TestHome::new();
    json_output(&home, &["add", "Run", "--category", "health"]);
    json_output(&home, &["add", "Read", "--category", "learning"]);

    let value = json_output(&home, &["list", "--category", "health"]);
    let habits = value["data"]["habits"].as_array().expect("habits");
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0]["name"], "Run");
}
