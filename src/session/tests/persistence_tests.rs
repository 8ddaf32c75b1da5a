//! Selection files and mask export through a session.

use gridmask_model::CellState;

use super::{record, write_image};
use crate::format::SelectionFile;
use crate::session::{Session, SessionEvent};

#[test]
fn test_save_writes_full_grid() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path(), "shot.png", 100, 100);
    let mut session = Session::new().with_cell_size(50);
    session.open_file(&image).unwrap();
    session.toggle_cell(0, 0);
    let events = record(&mut session);

    let path = session.save_selection_file().unwrap().unwrap();

    assert_eq!(path, dir.path().join("shot.txt"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "50,2,2\n0,0,1\n1,0,0\n0,1,0\n1,1,0\n"
    );
    assert_eq!(*events.borrow(), vec![SessionEvent::SelectionSaved { path }]);
    assert!(!session.is_dirty());
}

#[test]
fn test_reopen_restores_saved_grid() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path(), "shot.png", 60, 40);
    let mut session = Session::new().with_cell_size(20);
    session.open_file(&image).unwrap();
    session.set_cell(2, 1, CellState::Forbidden);
    session.toggle_cell(0, 0);
    session.save_selection_file().unwrap();
    let saved = session.grid().clone();

    let mut reopened = Session::new().with_cell_size(20);
    reopened.open_file(&image).unwrap();

    assert_eq!(reopened.grid(), &saved);
    assert!(!reopened.is_dirty());
}

#[test]
fn test_selection_file_cell_size_wins() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path(), "shot.png", 60, 40);
    std::fs::write(dir.path().join("shot.txt"), "30,2,1\n1,0,1\n").unwrap();

    let mut session = Session::new().with_cell_size(20);
    let events = record(&mut session);
    session.open_file(&image).unwrap();

    assert_eq!(session.cell_size(), 30);
    assert_eq!((session.grid().width(), session.grid().height()), (2, 1));
    assert_eq!(session.grid().get(1, 0), Ok(CellState::Selected));
    assert_eq!(session.grid().get(0, 0), Ok(CellState::Default));
    assert_eq!(events.borrow()[0], SessionEvent::CellSizeChanged(30));
}

#[test]
fn test_malformed_header_falls_back_to_uniform() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path(), "shot.png", 60, 40);
    let selection = dir.path().join("shot.txt");
    std::fs::write(&selection, "100,200\n0,0,1\n").unwrap();

    let mut session = Session::new().with_cell_size(20);
    session.open_file(&image).unwrap();

    assert_eq!(session.cell_size(), 20);
    assert_eq!((session.grid().width(), session.grid().height()), (3, 2));
    assert_eq!(session.grid().count(CellState::Default), 6);
    assert_eq!(
        std::fs::read_to_string(&selection).unwrap(),
        "100,200\n0,0,1\n"
    );
}

#[test]
fn test_oversized_selection_header_falls_back_to_uniform() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path(), "shot.png", 60, 40);
    std::fs::write(
        dir.path().join("shot.txt"),
        "100,18446744073709551615,2\n0,0,1\n",
    )
    .unwrap();

    let mut session = Session::new().with_cell_size(20);
    session.open_file(&image).unwrap();

    assert_eq!(session.cell_size(), 20);
    assert_eq!((session.grid().width(), session.grid().height()), (3, 2));
    assert_eq!(session.grid().count(CellState::Selected), 0);
}

#[test]
fn test_export_mask_error_is_returned() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path(), "shot.png", 60, 40);
    std::fs::write(dir.path().join("shot.txt"), "3000000000,2,1\n1,0,1\n").unwrap();
    let mut session = Session::new();
    session.open_file(&image).unwrap();
    assert_eq!(session.cell_size(), 3_000_000_000);

    assert!(session.export_mask().is_err());
    assert!(!dir.path().join("masks").exists());
}

#[test]
fn test_malformed_line_falls_back_to_uniform() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path(), "shot.png", 60, 40);
    std::fs::write(dir.path().join("shot.txt"), "20,3,2\n0,0,1\n1,0\n").unwrap();

    let mut session = Session::new().with_cell_size(20);
    session.open_file(&image).unwrap();

    assert_eq!(session.grid().count(CellState::Selected), 0);
    assert_eq!((session.grid().width(), session.grid().height()), (3, 2));
}

#[test]
fn test_regrid_does_not_reload_old_selection() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path(), "shot.png", 60, 40);
    let mut session = Session::new().with_cell_size(20);
    session.open_file(&image).unwrap();
    session.toggle_cell(0, 0);
    session.save_selection_file().unwrap();

    session.set_pixel_grid_size(10).unwrap();

    assert_eq!(session.cell_size(), 10);
    assert_eq!((session.grid().width(), session.grid().height()), (6, 4));
    assert_eq!(session.grid().count(CellState::Selected), 0);

    let on_disk = SelectionFile::load(&dir.path().join("shot.txt")).unwrap();
    assert_eq!(on_disk.cell_size, 20);
}

#[test]
fn test_export_mask_creates_masks_folder() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path(), "shot.jpg", 60, 40);
    let mut session = Session::new().with_cell_size(20);
    session.open_file(&image).unwrap();
    session.toggle_cell(1, 0);
    session.set_cell(0, 1, CellState::Forbidden);
    let events = record(&mut session);

    let path = session.export_mask().unwrap().unwrap();

    assert_eq!(path, dir.path().join("masks").join("shot.png"));
    let mask = image::open(&path).unwrap().to_luma8();
    assert_eq!(mask.dimensions(), (60, 40));
    assert_eq!(mask.get_pixel(25, 5).0, [255]);
    assert_eq!(mask.get_pixel(5, 25).0, [128]);
    assert_eq!(mask.get_pixel(5, 5).0, [0]);
    assert_eq!(*events.borrow(), vec![SessionEvent::MaskExported { path }]);
}
