//! Interactive terminal viewer for the solar system simulation
//!
//! Planets orbit in real time; scroll to zoom (anchored at the cursor),
//! drag to pan, click anywhere to see the gravitational pull of every body
//! at that point, space to freeze and resume the orbits.

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use nalgebra::Point2;
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use orrery::gravity::format_acceleration;
use orrery::{Camera, GravitySample, Simulation, SolarSystem};

const FPS_CAP: u64 = 30;
/// Rows per column-unit; terminal cells are roughly twice as tall as wide
const CELL_ASPECT: f64 = 0.5;
const PAN_STEP: f64 = 4.0;
const GRAVITY_PANEL_W: u16 = 30;

// -------------------- Cell buffer + diff render --------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
}

impl Cell {
    fn blank() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
        }
    }
}

fn put_cell(buf: &mut [Cell], w: u16, h: u16, x: i32, y: i32, c: Cell) {
    if x < 0 || y < 0 || x >= w as i32 || y >= h as i32 {
        return;
    }
    buf[y as usize * w as usize + x as usize] = c;
}

fn write_str(buf: &mut [Cell], w: u16, h: u16, x: i32, y: i32, text: &str, fg: Color) {
    for (i, ch) in text.chars().enumerate() {
        put_cell(buf, w, h, x + i as i32, y, Cell { ch, fg });
    }
}

fn render_diff(out: &mut Stdout, w: u16, h: u16, prev: &mut [Cell], cur: &[Cell]) -> io::Result<()> {
    let mut cur_fg = Color::Reset;
    for y in 0..h as usize {
        for x in 0..w as usize {
            let i = y * w as usize + x;
            if prev[i] == cur[i] {
                continue;
            }
            prev[i] = cur[i];

            let c = cur[i];
            queue!(out, cursor::MoveTo(x as u16, y as u16))?;
            if c.fg != cur_fg {
                cur_fg = c.fg;
                queue!(out, SetForegroundColor(cur_fg))?;
            }
            queue!(out, Print(c.ch))?;
        }
    }
    Ok(())
}

// -------------------- Palette --------------------

fn body_color(name: &str) -> Color {
    match name {
        "Sun" => Color::Yellow,
        "Mercury" => Color::Grey,
        "Venus" => Color::DarkYellow,
        "Earth" => Color::Blue,
        "Mars" => Color::Red,
        "Jupiter" => Color::DarkRed,
        "Saturn" => Color::Rgb {
            r: 218,
            g: 165,
            b: 32,
        },
        "Uranus" => Color::Cyan,
        "Neptune" => Color::DarkBlue,
        _ => Color::White,
    }
}

// -------------------- Coordinate plumbing --------------------

/// Camera screen units for a terminal of `cols` x `rows` cells
fn viewport_units(cols: u16, rows: u16) -> (f64, f64) {
    (cols as f64, rows as f64 / CELL_ASPECT)
}

fn cell_of(screen: Point2<f64>) -> (i32, i32) {
    (
        screen.x.round() as i32,
        (screen.y * CELL_ASPECT).round() as i32,
    )
}

fn screen_of_cell(col: u16, row: u16) -> Point2<f64> {
    Point2::new(col as f64, row as f64 / CELL_ASPECT)
}

// -------------------- Scene drawing --------------------

struct View {
    camera: Camera,
    show_labels: bool,
    show_orbits: bool,
    probe: Option<(Point2<f64>, Vec<GravitySample>)>,
}

fn draw_scene(buf: &mut [Cell], w: u16, h: u16, sim: &Simulation, view: &View) {
    let (vw, vh) = viewport_units(w, h);
    let dim = Color::Rgb {
        r: 70,
        g: 80,
        b: 90,
    };

    // Orbit circles under everything else
    if view.show_orbits {
        for body in sim.system().iter() {
            let Some(orbit) = body.orbit else { continue };
            let circumference_cells = orbit.radius_au * view.camera.scale() * std::f64::consts::TAU;
            let steps = (circumference_cells * 2.0).clamp(64.0, 1024.0) as usize;
            for i in 0..steps {
                let a = i as f64 / steps as f64 * std::f64::consts::TAU;
                let world = Point2::new(a.cos() * orbit.radius_au, a.sin() * orbit.radius_au);
                let (x, y) = cell_of(view.camera.world_to_screen(world, vw, vh));
                put_cell(buf, w, h, x, y, Cell { ch: '·', fg: dim });
            }
        }
    }

    // Bodies and labels
    for (body, position) in sim.positions() {
        let (x, y) = cell_of(view.camera.world_to_screen(position, vw, vh));
        let color = body_color(&body.name);
        let marker = if body.is_central() { '☉' } else { '●' };
        put_cell(buf, w, h, x, y, Cell { ch: marker, fg: color });
        if view.show_labels {
            write_str(buf, w, h, x + 2, y, &body.name, color);
        }
    }

    // Probe crosshair
    if let Some((point, _)) = &view.probe {
        let (x, y) = cell_of(view.camera.world_to_screen(*point, vw, vh));
        put_cell(buf, w, h, x, y, Cell { ch: '+', fg: Color::White });
    }
}

fn draw_legend(buf: &mut [Cell], w: u16, h: u16, sim: &Simulation) {
    write_str(buf, w, h, 1, 1, "Legend", Color::White);
    let mut row = 2;
    for body in sim.system().iter().filter(|b| !b.is_central()) {
        put_cell(
            buf,
            w,
            h,
            1,
            row,
            Cell {
                ch: '■',
                fg: body_color(&body.name),
            },
        );
        write_str(buf, w, h, 3, row, &body.name, Color::Grey);
        row += 1;
    }
}

fn draw_gravity_panel(buf: &mut [Cell], w: u16, h: u16, probe: &(Point2<f64>, Vec<GravitySample>)) {
    let (point, samples) = probe;
    let x = w.saturating_sub(GRAVITY_PANEL_W) as i32;

    write_str(
        buf,
        w,
        h,
        x,
        1,
        &format!("Gravity at ({:.4}, {:.4}) AU", point.x, point.y),
        Color::White,
    );
    write_str(buf, w, h, x, 2, "Body      a (m/s^2)", Color::Grey);
    for (i, sample) in samples.iter().enumerate() {
        write_str(
            buf,
            w,
            h,
            x,
            3 + i as i32,
            &format!(
                "{:<9} {}",
                sample.body,
                format_acceleration(sample.acceleration)
            ),
            body_color(&sample.body),
        );
    }
}

fn draw_status(buf: &mut [Cell], w: u16, h: u16, sim: &Simulation, view: &View) {
    let state = if sim.is_running() { "running" } else { "stopped" };
    let status = format!(
        " zoom {:.2}x | time x{:.0} | {} ",
        view.camera.zoom(),
        sim.time_scale(),
        state
    );
    let help = "space start/stop  +/- time  scroll zoom  drag pan  click gravity  r reset  q quit";
    write_str(buf, w, h, 1, h as i32 - 2, help, Color::Grey);
    write_str(buf, w, h, 1, h as i32 - 1, &status, Color::White);
}

// -------------------- Main --------------------

fn main() -> io::Result<()> {
    env_logger::init();

    let mut out = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
    let res = run(&mut out);
    execute!(out, ResetColor, cursor::Show, DisableMouseCapture, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    res
}

fn run(out: &mut Stdout) -> io::Result<()> {
    let mut sim = Simulation::new(SolarSystem::standard());
    sim.start();

    let mut view = View {
        camera: Camera::new(),
        show_labels: true,
        show_orbits: true,
        probe: None,
    };

    // drag state
    let mut drag_from: Option<(u16, u16)> = None;
    let mut dragging = false;

    // buffers
    let mut prev_w: u16 = 0;
    let mut prev_h: u16 = 0;
    let mut prev_buf: Vec<Cell> = Vec::new();
    let mut cur_buf: Vec<Cell> = Vec::new();

    let epoch = Instant::now();
    let frame_dt = Duration::from_millis(1000 / FPS_CAP);

    loop {
        let frame_start = Instant::now();
        let (w, h) = terminal::size()?;

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind == KeyEventKind::Press => match k.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                    KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                        if sim.is_running() {
                            sim.stop();
                        } else {
                            sim.start();
                        }
                    }
                    KeyCode::Char('+') | KeyCode::Char('=') => {
                        sim.set_time_scale(sim.time_scale() * 2.0);
                    }
                    KeyCode::Char('-') => {
                        sim.set_time_scale((sim.time_scale() / 2.0).max(1.0));
                    }
                    KeyCode::Left => view.camera.pan_by(PAN_STEP, 0.0),
                    KeyCode::Right => view.camera.pan_by(-PAN_STEP, 0.0),
                    KeyCode::Up => view.camera.pan_by(0.0, PAN_STEP),
                    KeyCode::Down => view.camera.pan_by(0.0, -PAN_STEP),
                    KeyCode::Char('l') | KeyCode::Char('L') => view.show_labels = !view.show_labels,
                    KeyCode::Char('o') | KeyCode::Char('O') => view.show_orbits = !view.show_orbits,
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        view.camera.reset();
                        view.probe = None;
                    }
                    _ => {}
                },
                Event::Mouse(m) => {
                    let (vw, vh) = viewport_units(w, h);
                    let cursor_screen = screen_of_cell(m.column, m.row);
                    match m.kind {
                        MouseEventKind::ScrollUp => {
                            view.camera.wheel_zoom(cursor_screen, vw, vh, true);
                        }
                        MouseEventKind::ScrollDown => {
                            view.camera.wheel_zoom(cursor_screen, vw, vh, false);
                        }
                        MouseEventKind::Down(MouseButton::Left) => {
                            drag_from = Some((m.column, m.row));
                            dragging = false;
                        }
                        MouseEventKind::Drag(MouseButton::Left) => {
                            if let Some((px, py)) = drag_from {
                                let dx = m.column as f64 - px as f64;
                                let dy = (m.row as f64 - py as f64) / CELL_ASPECT;
                                view.camera.pan_by(dx, dy);
                                dragging = true;
                            }
                            drag_from = Some((m.column, m.row));
                        }
                        MouseEventKind::Up(MouseButton::Left) => {
                            // A drag that never moved is a click: probe gravity
                            if drag_from.is_some() && !dragging {
                                let world = view.camera.screen_to_world(cursor_screen, vw, vh);
                                view.probe = Some((world, sim.gravity_at(world)));
                            }
                            drag_from = None;
                            dragging = false;
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let now_ms = epoch.elapsed().as_secs_f64() * 1000.0;
        sim.advance(now_ms);

        // (Re)allocate buffers on resize
        if w != prev_w || h != prev_h {
            prev_w = w;
            prev_h = h;
            prev_buf = vec![Cell::blank(); w as usize * h as usize];
            cur_buf = prev_buf.clone();
            execute!(out, terminal::Clear(ClearType::All))?;
        }
        cur_buf.fill(Cell::blank());

        draw_scene(&mut cur_buf, w, h, &sim, &view);
        draw_legend(&mut cur_buf, w, h, &sim);
        if let Some(probe) = &view.probe {
            draw_gravity_panel(&mut cur_buf, w, h, probe);
        }
        draw_status(&mut cur_buf, w, h, &sim, &view);

        render_diff(out, w, h, &mut prev_buf, &cur_buf)?;
        out.flush()?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_dt {
            std::thread::sleep(frame_dt - elapsed);
        }
    }
}
