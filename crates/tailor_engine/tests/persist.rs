use std::fs;

use tailor_engine::{ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out").join("nested");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn each_write_overwrites_the_previous_output() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("output_resume.docx", b"first run").unwrap();
    assert_eq!(first.file_name().unwrap(), "output_resume.docx");
    assert_eq!(fs::read(&first).unwrap(), b"first run");

    let second = writer.write("output_resume.docx", b"second").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"second");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn for_path_splits_directory_and_name() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("out").join("resume.docx");

    let (writer, name) = AtomicFileWriter::for_path(&target).unwrap();
    assert_eq!(name, "resume.docx");
    assert_eq!(writer.write(&name, b"x").unwrap(), target);

    let (_, bare) = AtomicFileWriter::for_path(std::path::Path::new("bare.docx")).unwrap();
    assert_eq!(bare, "bare.docx");
    assert!(AtomicFileWriter::for_path(std::path::Path::new("/")).is_err());
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("output_resume.docx", b"data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("output_resume.docx").exists());
}
