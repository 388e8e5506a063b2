//! Tests for the command line surface
//!
//! These tests verify:
//! - Argument parsing
//! - One-shot subcommands
//! - The interactive menu driven from scripted input

use std::fs;
use std::io::Cursor;

use clap::Parser;
use rollcall::cli::{self, Args, Command};
use rollcall::config::Config;
use rollcall::record::Student;
use rollcall::service::{NewStudent, StudentService};
use rollcall::storage::FileStorage;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_service() -> (TempDir, Config, StudentService<FileStorage<Student>>) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp_dir.path().join("data"))
        .reports_dir(temp_dir.path().join("reports"))
        .build();
    let service = StudentService::new(FileStorage::new(config.storage.clone()));
    (temp_dir, config, service)
}

fn add_alice(service: &StudentService<FileStorage<Student>>) -> Student {
    service
        .add_student(NewStudent {
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            age: 20,
            course: "CS".to_string(),
            gpa: 3.8,
        })
        .unwrap()
}

/// Run `command` with scripted stdin, returning everything written
fn run_with_input(
    command: Command,
    service: &StudentService<FileStorage<Student>>,
    config: &Config,
    input: &str,
) -> rollcall::Result<String> {
    let mut out = Vec::new();
    cli::run(command, service, config, Cursor::new(input.to_string()), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

// =============================================================================
// Argument Parsing Tests
// =============================================================================

#[test]
fn test_args_defaults_to_menu() {
    let args = Args::try_parse_from(["rollcall"]).unwrap();

    assert_eq!(args.command, None);
    let config = args.config();
    assert_eq!(config.storage.data_dir, std::path::PathBuf::from("data"));
    assert_eq!(config.storage.file_extension, ".csv");
}

#[test]
fn test_args_parse_subcommand() {
    let args = Args::try_parse_from([
        "rollcall", "-d", "/tmp/db", "adjust-gpa", "--course", "CS", "--factor", "1.1",
    ])
    .unwrap();

    assert_eq!(args.data_dir, std::path::PathBuf::from("/tmp/db"));
    assert_eq!(
        args.command,
        Some(Command::AdjustGpa {
            course: "CS".to_string(),
            factor: 1.1
        })
    );
}

// =============================================================================
// Subcommand Tests
// =============================================================================

#[test]
fn test_list_empty() {
    let (_temp, config, service) = setup_temp_service();

    let out = run_with_input(Command::List, &service, &config, "").unwrap();

    assert!(out.contains("There are no Students :("));
}

#[test]
fn test_add_then_show() {
    let (_temp, config, service) = setup_temp_service();

    let out = run_with_input(
        Command::Add {
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            age: 20,
            course: "CS".to_string(),
            gpa: 3.8,
        },
        &service,
        &config,
        "",
    )
    .unwrap();
    assert!(out.starts_with("Student added with ID ST"));

    let id = out.trim().rsplit(' ').next().unwrap().to_string();
    let shown = run_with_input(Command::Show { id }, &service, &config, "").unwrap();
    assert!(shown.contains("Alice"));
    assert!(shown.contains("alice@x.com"));
}

#[test]
fn test_update_requires_a_field() {
    let (_temp, config, service) = setup_temp_service();
    let alice = add_alice(&service);

    let result = run_with_input(
        Command::Update {
            id: alice.id,
            name: None,
            email: None,
            age: None,
            course: None,
            gpa: None,
        },
        &service,
        &config,
        "",
    );

    assert!(matches!(result, Err(rollcall::RollcallError::Validation(_))));
}

#[test]
fn test_remove_asks_for_confirmation() {
    let (_temp, config, service) = setup_temp_service();
    let alice = add_alice(&service);

    let declined = Command::Remove {
        id: alice.id.clone(),
        yes: false,
    };
    run_with_input(declined, &service, &config, "n\n").unwrap();
    assert!(service.find_student(&alice.id).unwrap().is_some());

    let confirmed = Command::Remove {
        id: alice.id.clone(),
        yes: false,
    };
    let out = run_with_input(confirmed, &service, &config, "Y\n").unwrap();
    assert!(out.contains("Student removed"));
    assert!(service.find_student(&alice.id).unwrap().is_none());
}

#[test]
fn test_remove_unknown_student() {
    let (_temp, config, service) = setup_temp_service();

    let out = run_with_input(
        Command::Remove {
            id: "ST404".to_string(),
            yes: true,
        },
        &service,
        &config,
        "",
    )
    .unwrap();

    assert!(out.contains("Student does not exist"));
}

#[test]
fn test_import_and_export() {
    let (temp, config, service) = setup_temp_service();
    let csv = temp.path().join("in.csv");
    fs::write(
        &csv,
        "Name,Email,Age,Course,GPA\nAlice,alice@x.com,20,CS,3.8\nBob,bob@x.com,x,CS,3.0\nCarol,carol@x.com,21,CS,3.1\n",
    )
    .unwrap();

    let out = run_with_input(Command::Import { path: csv }, &service, &config, "").unwrap();
    assert!(out.contains("Students successfully imported: 2"));
    assert!(out.contains("Line 3: Invalid age - x"));

    let out = run_with_input(Command::Export, &service, &config, "").unwrap();
    assert!(out.contains("Report exported successfully to:"));
    assert!(config.report_path().exists());
}

#[test]
fn test_adjust_gpa_command() {
    let (_temp, config, service) = setup_temp_service();
    let alice = add_alice(&service);

    let out = run_with_input(
        Command::AdjustGpa {
            course: "CS".to_string(),
            factor: 0.5,
        },
        &service,
        &config,
        "",
    )
    .unwrap();

    assert!(out.contains("Updated GPA for 1 students in CS"));
    assert_eq!(service.find_student(&alice.id).unwrap().unwrap().gpa, 1.9);
}

// =============================================================================
// Interactive Menu Tests
// =============================================================================

#[test]
fn test_menu_exit() {
    let (_temp, config, service) = setup_temp_service();

    let out = run_with_input(Command::Menu, &service, &config, "0\n").unwrap();

    assert!(out.contains("=== Student Management System ==="));
}

#[test]
fn test_menu_end_of_input_exits() {
    let (_temp, config, service) = setup_temp_service();

    assert!(run_with_input(Command::Menu, &service, &config, "").is_ok());
    assert!(run_with_input(Command::Menu, &service, &config, "1\nAlice\n").is_ok());
}

#[test]
fn test_menu_invalid_option() {
    let (_temp, config, service) = setup_temp_service();

    let out = run_with_input(Command::Menu, &service, &config, "42\n0\n").unwrap();

    assert!(out.contains("Invalid operation. Please try again."));
}

#[test]
fn test_menu_add_and_list() {
    let (_temp, config, service) = setup_temp_service();
    let script = "1\n\nAlice\nnot-an-email\nalice@x.com\n20\nCS\n3.8\n5\n0\n";

    let out = run_with_input(Command::Menu, &service, &config, script).unwrap();

    assert!(out.contains("Please try again."));
    assert!(out.contains("Student Added Successfully!"));
    assert!(out.contains("Alice"));

    let students = service.list_students().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].email, "alice@x.com");
}

#[test]
fn test_menu_reports_errors_and_continues() {
    let (_temp, config, service) = setup_temp_service();
    add_alice(&service);
    let script = "1\nOther\nalice@x.com\n30\nMath\n2.0\n6\n0\n";

    let out = run_with_input(Command::Menu, &service, &config, script).unwrap();

    assert!(out.contains("Error: A student with email"));
    assert!(out.contains("Number of Students: 1"));
}

#[test]
fn test_menu_update_and_remove() {
    let (_temp, config, service) = setup_temp_service();
    let alice = add_alice(&service);
    let script = format!(
        "2\n{id}\nAlicia\n\n\n\n3.9\n3\n{id}\ny\n0\n",
        id = alice.id
    );

    let out = run_with_input(Command::Menu, &service, &config, &script).unwrap();

    assert!(out.contains("Student Updated Successfully!"));
    assert!(out.contains("name=Alicia"));
    assert!(out.contains("Student Removed Successfully!"));
    assert!(service.list_students().unwrap().is_empty());
}

#[test]
fn test_menu_unknown_id() {
    let (_temp, config, service) = setup_temp_service();

    let out = run_with_input(Command::Menu, &service, &config, "4\nST404\n0\n").unwrap();

    assert!(out.contains("Student does not exist :("));
}
