use crate::animation::{self, RepaintRequest, Scheduler};
use crate::canvas::BrailleCanvas;
use crate::config::constants::{FALLBACK_COLS, FALLBACK_ROWS};
use crate::config::{FrameConfig, PrintSize, ShowConfig};
use crate::geometry::SegmentSink;
use crate::raster::ImageCanvas;
use crate::renderer::TreeRenderer;
use crate::terminal::Terminal;
use crossterm::event::{KeyCode, KeyModifiers};
use std::io;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

/// How long the loop waits for input before checking for repaints
const INPUT_POLL: Duration = Duration::from_millis(10);

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Pass every waiting repaint request to the renderer. Returns true if a
/// repaint is needed. Requests that arrive together collapse to the last one.
fn drain_requests(rx: &Receiver<RepaintRequest>, renderer: &mut TreeRenderer) -> bool {
    let mut repaint = false;
    loop {
        match rx.try_recv() {
            Ok(request) => {
                renderer.queue_depth(request.depth);
                repaint = true;
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
    }
    repaint
}

fn paint(renderer: &mut TreeRenderer, canvas: &mut BrailleCanvas, term: &mut Terminal) -> io::Result<()> {
    canvas.clear();
    renderer.paint(canvas);
    term.clear();
    canvas.blit(term);
    term.present()
}

/// Run the animated canvas until the user quits
pub fn run_show(config: ShowConfig) -> io::Result<()> {
    let start = Instant::now();
    let mut term = Terminal::new(true)?;
    term.clear_screen()?;

    let (width, height) = term.size();
    let mut canvas = BrailleCanvas::new(width, height);
    let mut renderer = TreeRenderer::new(config.mode);
    let (tx, rx) = mpsc::channel();
    let mut needs_paint = true;

    loop {
        let (new_w, new_h) = crossterm::terminal::size().unwrap_or(term.size());
        if (new_w, new_h) != term.size() {
            term.resize(new_w, new_h);
            term.clear_screen()?;
            canvas = BrailleCanvas::new(new_w, new_h);
            needs_paint = true;
        }

        if needs_paint {
            paint(&mut renderer, &mut canvas, &mut term)?;

            if renderer.begin_animation() {
                log::debug!("starting depth timer ({} steps per tick)", config.steps_per_tick);
                animation::spawn(Scheduler::new(start), config.steps_per_tick, tx.clone())?;
            }
        }

        if let Some((code, modifiers)) = term.wait_key(INPUT_POLL)? {
            if is_quit(code, modifiers) {
                break;
            }
        }

        needs_paint = drain_requests(&rx, &mut renderer);
    }

    log::debug!("{} paints, animation {:?}", renderer.paints(), renderer.state().phase());
    Ok(())
}

/// Paint a single frame for print and export
fn paint_frame<S: SegmentSink>(frame: &FrameConfig, canvas: &mut S) {
    let mut renderer = TreeRenderer::new(frame.mode);
    renderer.queue_depth(frame.effective_depth());
    renderer.paint(canvas);
}

/// Print one frame to stdout
pub fn run_print(frame: FrameConfig, size: PrintSize) -> io::Result<()> {
    let (term_w, term_h) = crossterm::terminal::size().unwrap_or((FALLBACK_COLS, FALLBACK_ROWS));
    let cols = size.cols.unwrap_or(term_w).max(1);
    let rows = size.rows.unwrap_or(term_h).max(1);

    let mut canvas = BrailleCanvas::new(cols, rows);
    paint_frame(&frame, &mut canvas);

    let mut term = Terminal::with_size(cols, rows);
    canvas.blit(&mut term);
    term.print_to_stdout()
}

/// Render one frame at full resolution and save it as an image
pub fn run_export(path: &Path, frame: FrameConfig) -> io::Result<()> {
    let mut canvas = ImageCanvas::new();
    paint_frame(&frame, &mut canvas);
    canvas.save(path)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DrawMode;

    #[test]
    fn quit_keys() {
        assert!(is_quit(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(is_quit(KeyCode::Esc, KeyModifiers::NONE));
        assert!(is_quit(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!is_quit(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(!is_quit(KeyCode::Char(' '), KeyModifiers::NONE));
    }

    #[test]
    fn drain_keeps_latest_depth() {
        let (tx, rx) = mpsc::channel();
        let mut renderer = TreeRenderer::new(DrawMode::SlowOnly);
        assert!(!drain_requests(&rx, &mut renderer));

        tx.send(RepaintRequest { depth: 0 }).expect("send");
        tx.send(RepaintRequest { depth: 1 }).expect("send");
        assert!(drain_requests(&rx, &mut renderer));
        assert_eq!(renderer.state().pending_depth(), Some(1));

        drop(tx);
        assert!(!drain_requests(&rx, &mut renderer));
    }

    #[test]
    fn unbounded_frame_fills_the_image() {
        let frame = FrameConfig {
            mode: DrawMode::SlowOnly,
            depth: None,
        };
        let mut canvas = ImageCanvas::new();
        paint_frame(&frame, &mut canvas);

        // both trunks of the center tree, colored with consecutive hue runs
        assert_ne!(canvas.pixel(450, 400), Some(crate::raster::BACKGROUND));
        assert_ne!(canvas.pixel(450, 500), Some(crate::raster::BACKGROUND));
        // no branch reaches further than four trunk lengths
        assert_eq!(canvas.pixel(20, 20), Some(crate::raster::BACKGROUND));
    }

    #[test]
    fn all_mode_frame_draws_plain_tree_in_black() {
        let frame = FrameConfig {
            mode: DrawMode::All,
            depth: Some(0),
        };
        let mut canvas = ImageCanvas::new();
        paint_frame(&frame, &mut canvas);

        assert_eq!(canvas.pixel(225, 400), Some(crate::raster::AMBIENT));
        assert_ne!(canvas.pixel(675, 400), Some(crate::raster::BACKGROUND));
    }
}
