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

// Empty storage, seed, complete one habit, watch the stats move.
#[test]
fn first_run_flow_from_seed_to_first_completion() {
    let home = TestHome::new();

    let init = json_output(&home, &["init", "--name", "Sam"]);
    assert_eq!(init["data"]["seeded"], true);
    let habits = init["data"]["habits"].as_array().expect("habits");
    assert_eq!(habits.len(), 2);

    let stats = json_output(&home, &["stats"]);
    assert_eq!(stats["data"]["completion_rate"], 0);
    assert_eq!(stats["data"]["habits"], 2);

    // The default starter set carries a pre-existing streak of 3.
    let first = &habits[0];
    let id = first["id"].as_i64().expect("id").to_string();
    let prior_streak = first["streak"].as_u64().expect("streak");

    let done = json_output(&home, &["done", &id]);
    assert_eq!(done["data"]["completed"], true);
    assert_eq!(
        done["data"]["habit"]["streak"].as_u64().unwrap(),
        prior_streak + 1
    );

    let stats = json_output(&home, &["stats"]);
    assert_eq!(stats["data"]["completion_rate"], 50);
    assert_eq!(stats["data"]["completed_today"], 1);
}

#[test]
fn init_is_idempotent_for_habit_seeding() {
    let home = TestHome::new();
    json_output(&home, &["init"]);
    let habits = home.read_habits();
    assert_eq!(habits.len(), 2);

    let again = json_output(&home, &["init", "--goal", "mindfulness"]);
    assert_eq!(again["data"]["seeded"], false);
    // Existing collection untouched.
    assert_eq!(home.read_habits(), habits);
}

#[test]
fn goal_seeding_picks_the_goal_set() {
    let home = TestHome::new();
    let init = json_output(&home, &["init", "--goal", "productivity"]);
    let habits = init["data"]["habits"].as_array().expect("habits");
    assert_eq!(habits.len(), 2);
    for habit in habits {
        assert_eq!(habit["category"], "productivity");
        assert_eq!(habit["streak"], 0);
    }
}

#[test]
fn stats_on_empty_storage_are_all_zero() {
    let home = TestHome::new();
    let stats = json_output(&home, &["stats"]);
    assert_eq!(stats["data"]["habits"], 0);
    assert_eq!(stats["data"]["completion_rate"], 0);
    assert_eq!(stats["data"]["average_streak"], 0);
    assert_eq!(stats["data"]["longest_streak"], 0);
}

#[test]
fn badges_report_unlock_counts() {
    let home = TestHome::new();
    let badges = json_output(&home, &["badges"]);
    assert_eq!(badges["data"]["unlocked"], 0);
    assert_eq!(badges["data"]["total"], 6);

    json_output(&home, &["add", "Read"]);
    let badges = json_output(&home, &["badges"]);
    assert_eq!(badges["data"]["unlocked"], 1);

    let one = json_output(&home, &["badges", "first-step"]);
    let entries = one["data"]["badges"].as_array().expect("badges");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["unlocked"], true);

    home.cmd()
        .args(["badges", "nope"])
        .assert()
        .failure()
        .code(2);
}
