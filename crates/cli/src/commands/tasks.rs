//! `scout tasks` — List registered tasks.

use scout_tasks::TaskKind;

pub fn run() {
    println!("📋 Tasks ({}):", TaskKind::ALL.len());
    println!("{:-<72}", "");
    for kind in TaskKind::ALL {
        println!("  {:<20} {}", kind.name(), kind.description());
    }
}
