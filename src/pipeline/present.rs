//! Presenter stage: keeps only the latest snapshot and draws it.
//!
//! Default mode draws once, after the snapshots queue closes. Live mode also draws on a fixed
//! tick whenever a newer snapshot arrived since the last draw (latest wins, intermediate ones
//! are dropped). Both modes end with one unconditional draw of the final snapshot.

use comfy_table::presets::NOTHING;
use comfy_table::{Cell, CellAlignment, Table};
use crossbeam_channel::{Receiver, Sender, select, tick};
use log::{debug, warn};
use std::io::{self, IsTerminal, Write};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::utils::config::LiveConsts;
use crate::{FileRecord, Snapshot};

/// Why a draw happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderKind {
    /// Timer-driven redraw while the scan is still running.
    Live,
    /// Unconditional draw after the snapshots queue closed.
    Final,
}

/// Output seam for the presenter.
pub trait Render {
    fn render(&mut self, snapshot: &[FileRecord], kind: RenderKind) -> io::Result<()>;
}

/// Two-column `Path` / `Size` table, one row per record in ranked order.
pub fn format_table(snapshot: &[FileRecord]) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING).set_header(vec![
        Cell::new("Path"),
        Cell::new("Size").set_alignment(CellAlignment::Right),
    ]);
    for record in snapshot {
        table.add_row(vec![
            Cell::new(record.path.display()),
            Cell::new(record.size).set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}

/// Writes [`format_table`] output to `W`. With `clear_screen`, live draws wipe the previous one first.
pub struct TableRenderer<W: Write> {
    out: W,
    clear_screen: bool,
}

impl<W: Write> TableRenderer<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TableRenderer<io::Stdout> {
    /// Stdout renderer; clears between draws only in live mode on a terminal.
    pub fn stdout(live: bool) -> Self {
        let out = io::stdout();
        let clear_screen = live && out.is_terminal();
        Self::new(out, clear_screen)
    }
}

impl<W: Write> Render for TableRenderer<W> {
    fn render(&mut self, snapshot: &[FileRecord], _kind: RenderKind) -> io::Result<()> {
        if self.clear_screen {
            write!(self.out, "{}", LiveConsts::CLEAR_SCREEN)?;
        }
        writeln!(self.out, "{}", format_table(snapshot))?;
        self.out.flush()
    }
}

/// Sent on the done queue once the final draw is finished.
#[derive(Clone, Debug, Default)]
pub struct PresentReport {
    pub renders: usize,
    pub final_snapshot: Snapshot,
}

struct Presenter<'r, R: Render + ?Sized> {
    renderer: &'r mut R,
    current: Snapshot,
    renders: usize,
}

impl<R: Render + ?Sized> Presenter<'_, R> {
    fn draw(&mut self, kind: RenderKind) {
        match self.renderer.render(&self.current, kind) {
            Ok(()) => self.renders += 1,
            Err(e) => warn!("render failed: {}", e),
        }
    }
}

/// Run the presenter against `snapshot_rx` only. Returns after the final draw.
pub fn run_presenter<R: Render + ?Sized>(
    snapshot_rx: Receiver<Snapshot>,
    renderer: &mut R,
    live: bool,
    refresh_interval: Duration,
) -> PresentReport {
    let mut p = Presenter {
        renderer,
        current: Snapshot::new(),
        renders: 0,
    };

    if live {
        let ticker = tick(refresh_interval);
        let mut fresh = false;
        loop {
            select! {
                recv(snapshot_rx) -> msg => match msg {
                    Ok(snapshot) => {
                        p.current = snapshot;
                        fresh = true;
                    }
                    Err(_) => break,
                },
                recv(ticker) -> _ => {
                    if fresh {
                        p.draw(RenderKind::Live);
                        fresh = false;
                    }
                }
            }
        }
    } else {
        for snapshot in snapshot_rx.iter() {
            p.current = snapshot;
        }
    }

    debug!("present: snapshots queue closed, final draw");
    p.draw(RenderKind::Final);
    PresentReport {
        renders: p.renders,
        final_snapshot: p.current,
    }
}

/// Spawn the presenter stage. It owns `done_tx` and signals completion on it after the final draw.
pub fn spawn_present_thread<R>(
    snapshot_rx: Receiver<Snapshot>,
    done_tx: Sender<PresentReport>,
    mut renderer: R,
    live: bool,
    refresh_interval: Duration,
) -> JoinHandle<()>
where
    R: Render + Send + 'static,
{
    thread::spawn(move || {
        let report = run_presenter(snapshot_rx, &mut renderer, live, refresh_interval);
        let _ = done_tx.send(report);
    })
}
