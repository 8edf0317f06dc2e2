//! Demo entry point: boots a session, drives a short scripted
//! interaction through the shell, and prints the resulting desktop and
//! file-system state.

mod fs_seed;

use std::path::Path;

use aero_shell::{LaunchOutcome, MemoryStateStore, Shell, load_state, save_state};
use aero_types::config::DeskConfig;
use aero_types::id::NodeId;
use aero_vfs::FileStore;
use aero_wm::{AppKind, LaunchParams, SnapSide};
use anyhow::Result;
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config();
    info!(
        "desktop {}x{} (taskbar {})",
        config.screen_width, config.screen_height, config.taskbar_height
    );

    let mut shell = Shell::new(config.clone());
    fs_seed::populate_demo_fs(&mut shell.fs)?;

    shell.session.finish_boot();
    shell.login("guest_01", None)?;

    // A short scripted session: explorer + a file in notepad, a snapped
    // terminal, a PiP browser, and a second desktop with a settings page.
    shell.launch_app(AppKind::Explorer, LaunchParams::default());

    let todo = find_todo(&shell.fs);
    shell.launch_app(
        AppKind::Notepad,
        LaunchParams {
            file: todo,
            file_name: todo.map(|_| "todo.txt".to_string()),
        },
    );

    if let LaunchOutcome::Launched(term) =
        shell.launch_app(AppKind::Terminal, LaunchParams::default())
    {
        shell.wm.snap(term, SnapSide::Left);
    }
    if let LaunchOutcome::Launched(browser) =
        shell.launch_app(AppKind::Browser, LaunchParams::default())
    {
        shell.wm.toggle_pip(browser);
    }

    let second = shell.wm.add_desktop();
    shell.wm.switch_desktop(second);
    shell.launch_app(AppKind::Settings, LaunchParams::default());

    print_desktops(&shell);
    println!("\nfile system:");
    print_tree(&shell.fs, shell.fs.root(), 0)?;

    // Best-effort persistence round trip.
    let mut store = MemoryStateStore::default();
    save_state(&shell, &mut store)?;
    let restored = load_state(config, &store)?;
    println!(
        "\nsnapshot round trip: {} windows, {} nodes",
        restored.wm.windows().len(),
        restored.fs.len()
    );

    Ok(())
}

/// Load `desk.toml` next to the binary if present, defaults otherwise.
fn load_config() -> DeskConfig {
    let path = Path::new("desk.toml");
    if path.exists() {
        match DeskConfig::load(path) {
            Ok(config) => return config,
            Err(err) => log::warn!("ignoring desk.toml: {err}"),
        }
    }
    DeskConfig::default()
}

fn find_todo(fs: &FileStore) -> Option<NodeId> {
    let users = fs.resolve(fs.root(), "Users")?;
    let guest = fs.resolve(users, "Guest")?;
    let docs = fs.resolve(guest, "Documents")?;
    fs.resolve(docs, "todo.txt")
}

fn print_desktops(shell: &Shell) {
    for (idx, name) in shell.wm.desktops().iter().enumerate() {
        let marker = if idx == shell.wm.active_desktop() { "*" } else { " " };
        println!("{marker} {name}:");
        for id in shell.wm.stacking_order(idx) {
            if let Some(w) = shell.wm.get(id) {
                let mut flags = String::new();
                if w.maximized {
                    flags.push_str(" [max]");
                }
                if w.pip {
                    flags.push_str(" [pip]");
                }
                if w.always_on_top {
                    flags.push_str(" [top]");
                }
                println!(
                    "    {} (pid {}) at {},{} {}x{}{flags}",
                    w.title, w.pid, w.pos.x, w.pos.y, w.size.w, w.size.h
                );
            }
        }
    }
}

fn print_tree(fs: &FileStore, id: NodeId, depth: usize) -> Result<()> {
    if let Some(node) = fs.get(id) {
        println!("{}{}", "  ".repeat(depth), node.name);
        if node.is_folder() {
            for child in fs.contents(id)? {
                print_tree(fs, child.id, depth + 1)?;
            }
        }
    }
    Ok(())
}
