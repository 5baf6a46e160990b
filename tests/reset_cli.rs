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

// `done` stamps today's reset first, so the completion would survive any
// implicit trigger; the explicit command still clears it.
#[test]
fn reset_clears_completion_despite_todays_stamp() {
    let home = TestHome::new();
    let added = json_output(&home, &["add", "Read"]);
    let id = added["data"]["habit"]["id"].as_i64().expect("id").to_string();

    json_output(&home, &["done", &id]);
    assert!(home.read_habits()[0].completed_today);

    let reset = json_output(&home, &["reset"]);
    assert_eq!(reset["data"]["cleared"], 1);
    assert!(!home.read_habits()[0].completed_today);
}

#[test]
fn reset_clears_nothing_when_nothing_is_completed() {
    let home = TestHome::new();
    json_output(&home, &["add", "Read"]);

    let reset = json_output(&home, &["reset"]);
    assert_eq!(reset["data"]["cleared"], 0);
    assert_eq!(reset["data"]["habits"].as_array().unwrap().len(), 1);
}

// Implicit triggers stay gated on the stamp the explicit reset advances.
#[test]
fn implicit_reset_respects_the_stamp_left_by_reset() {
    let home = TestHome::new();
    let added = json_output(&home, &["add", "Read"]);
    let id = added["data"]["habit"]["id"].as_i64().expect("id").to_string();

    json_output(&home, &["reset"]);
    json_output(&home, &["done", &id]);

    // `list` reads today's state; the stamp keeps it from undoing the toggle.
    json_output(&home, &["list"]);
    assert!(home.read_habits()[0].completed_today);
}

#[test]
fn malformed_habits_file_degrades_to_empty() {
    let home = TestHome::new();
    std::fs::write(home.store().habits_file(), "{definitely not json").expect("write garbage");

    let value = json_output(&home, &["list"]);
    assert_eq!(value["data"]["habits"].as_array().unwrap().len(), 0);

    // The store stays usable: adds replace the malformed value.
    json_output(&home, &["add", "Read"]);
    assert_eq!(home.read_habits().len(), 1);
}
