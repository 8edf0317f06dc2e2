use aero_types::error::Result;
use aero_types::id::NodeId;
use aero_vfs::FileStore;

/// Create the canonical demo file tree: user profile folders plus a
/// couple of sample documents.
pub fn populate_demo_fs(fs: &mut FileStore) -> Result<NodeId> {
    let root = fs.root();
    let users = fs.create_folder(root, "Users")?;
    let guest = fs.create_folder(users, "Guest")?;
    let desktop = fs.create_folder(guest, "Desktop")?;
    let docs = fs.create_folder(guest, "Documents")?;
    fs.create_folder(guest, "Downloads")?;
    fs.create_folder(guest, "Pictures")?;
    fs.create_folder(guest, "Music")?;

    fs.create_file(
        desktop,
        "Welcome.txt",
        Some("Welcome to aero!\n\nThis is a simulated desktop environment."),
    )?;
    fs.create_file(docs, "todo.txt", Some("- Buy milk\n- Ship the shell\n- Sleep"))?;

    Ok(desktop)
}
