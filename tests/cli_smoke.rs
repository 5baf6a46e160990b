use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn habit_help_works() {
    Command::cargo_bin("habit")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("HabitMentor"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = [
        "init", "add", "done", "list", "edit", "rm", "reset", "stats", "badges", "reflect",
        "social", "tip",
    ];

    for cmd in subcommands {
        Command::cargo_bin("habit")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}
