use crate::animations::particles::hue_to_rgb;
use crate::app::{App, MenuState, ScreenState};
use crate::theme::ThemeName;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use nqueens_core::{format_time, Position, ThreatMatrix};
use std::io;

/// Width of one board square in columns
const CELL_WIDTH: u16 = 3;
/// Width of the info panel next to the board
const PANEL_WIDTH: u16 = 34;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide)?;

    match app.screen_state {
        // Redrawn completely every frame, no clear needed
        ScreenState::Win => render_win_screen(stdout, app, term_width, term_height)?,
        ScreenState::BestTimes => {
            execute!(stdout, Clear(ClearType::All))?;
            render_best_times_screen(stdout, app, term_width)?;
        }
        ScreenState::Playing => {
            execute!(stdout, Clear(ClearType::All))?;
            render_game_screen(stdout, app, term_width, term_height)?;
        }
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn text_width(text: &str) -> u16 {
    text.chars().count() as u16
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let size = app.session.effective_board_size() as u16;
    let board_width = size * CELL_WIDTH + 2;
    let board_height = size + 2;

    let total_width = board_width + 3 + PANEL_WIDTH;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > board_height + 8 { 2 } else { 1 };

    if app.session.has_game() {
        let shaken_x = (start_x as i16 + app.shake_offset()).max(0) as u16;
        render_board(stdout, app, shaken_x, start_y)?;
    } else {
        execute!(
            stdout,
            MoveTo(start_x, start_y),
            SetForegroundColor(app.theme.info),
            Print("Choose a board size and press n to start.")
        )?;
    }

    render_info_panel(stdout, app, start_x + board_width + 3, start_y)?;

    let controls_y = start_y + board_height.max(10) + 1;
    render_controls(stdout, app, start_x, controls_y)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    if app.menu != MenuState::None {
        render_menu(stdout, app, term_width, term_height)?;
    }

    Ok(())
}

fn render_board(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let size = app.session.effective_board_size();
    let threats = app.session.threat_matrix();
    let inner = "─".repeat(size * CELL_WIDTH as usize);

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        MoveTo(x, y),
        Print(format!("┌{}┐", inner))
    )?;

    for row in 0..size {
        let cell_y = y + 1 + row as u16;
        execute!(
            stdout,
            MoveTo(x, cell_y),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("│")
        )?;
        for col in 0..size {
            render_square(stdout, app, &threats, Position::new(row, col))?;
        }
        execute!(
            stdout,
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("│")
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, y + 1 + size as u16),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        Print(format!("└{}┘", inner))
    )?;

    Ok(())
}

fn render_square(
    stdout: &mut io::Stdout,
    app: &App,
    threats: &ThreatMatrix,
    pos: Position,
) -> io::Result<()> {
    let theme = &app.theme;
    let occupied = app
        .session
        .engine()
        .map_or(false, |engine| engine.is_occupied(pos));

    let bg = if pos == app.cursor {
        theme.selected_bg
    } else if (pos.x + pos.y) % 2 == 0 {
        theme.light_square
    } else {
        theme.dark_square
    };

    let (symbol, fg) = if occupied {
        (app.board_kind().symbol(), theme.figure)
    } else if threats.is_threatened(pos) {
        ('·', theme.threat)
    } else {
        (' ', theme.fg)
    };

    execute!(
        stdout,
        SetBackgroundColor(bg),
        SetForegroundColor(fg),
        Print(format!(" {} ", symbol))
    )?;

    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let session = &app.session;
    let size = session.effective_board_size();
    let kind = app.board_kind();

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let title = format!("N-{}", kind.display_name());
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print(&title)
    )?;
    if session.engine().map_or(false, |engine| engine.is_solved()) {
        execute!(
            stdout,
            SetForegroundColor(theme.success),
            Print("  Solved!")
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, y + 2),
        SetForegroundColor(theme.fg),
        Print(format!("Place {} figures on the board.", size)),
        MoveTo(x, y + 3),
        Print("None of them can attack each other.")
    )?;

    execute!(
        stdout,
        MoveTo(x, y + 5),
        SetForegroundColor(theme.fg),
        Print(format!("Placed {}", session.placed())),
        SetForegroundColor(theme.info),
        Print("   "),
        SetForegroundColor(theme.fg),
        Print(format!("Left {}", session.remaining()))
    )?;

    let best = session
        .best_time()
        .map(format_time)
        .unwrap_or_else(|| "--:--".to_string());
    execute!(
        stdout,
        MoveTo(x, y + 6),
        SetForegroundColor(theme.info),
        Print(format!("Time: {}", session.time_string())),
        MoveTo(x, y + 7),
        Print(format!("Best: {}", best))
    )?;

    let next_size = session.board_size();
    let next_kind = session.figure_kind();
    let next_color = if next_size != size || next_kind != kind {
        theme.key
    } else {
        theme.info
    };
    execute!(
        stdout,
        MoveTo(x, y + 9),
        SetForegroundColor(next_color),
        Print(format!(
            "Next game: {}x{} {} {}",
            next_size,
            next_size,
            next_kind.display_name(),
            next_kind.symbol()
        ))
    )?;

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("hjkl/Arrows", "Move"),
        ("Space/Enter", "Place/Remove"),
        ("n", "New game"),
        ("r", "Restart"),
        ("+/-", "Board size"),
        ("f", "Figure"),
        ("b", "Best times"),
        ("t", "Theme"),
        ("q", "Quit"),
    ];

    // Three columns of three
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 3;
        let row = i % 3;
        let cx = x + (col as u16) * 26;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>11}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(text_width(&padded)) / 2;
    let fg = if app.shake_offset() != 0 {
        theme.error
    } else {
        theme.fg
    };

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(fg),
        SetBackgroundColor(theme.selected_bg),
        Print(&padded)
    )?;

    Ok(())
}

fn render_menu(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;

    let options: Vec<String> = match app.menu {
        MenuState::NewGame => app
            .menu_sizes()
            .iter()
            .map(|size| format!("{}x{}", size, size))
            .collect(),
        MenuState::Theme => ThemeName::all()
            .iter()
            .map(|name| name.label().to_string())
            .collect(),
        MenuState::None => Vec::new(),
    };
    let has_figure_row = app.menu == MenuState::NewGame;

    let menu_width: u16 = 30;
    let extra_rows: u16 = if has_figure_row { 2 } else { 0 };
    let menu_height = options.len() as u16 + 5 + extra_rows;
    let x = term_width.saturating_sub(menu_width) / 2;
    let y = term_height.saturating_sub(menu_height) / 2;

    let bg = Color::Rgb {
        r: 30,
        g: 30,
        b: 40,
    };

    for row in 0..menu_height {
        execute!(
            stdout,
            MoveTo(x, y + row),
            SetBackgroundColor(bg),
            Print(" ".repeat(menu_width as usize))
        )?;
    }

    // Border
    execute!(
        stdout,
        SetForegroundColor(theme.border),
        SetBackgroundColor(bg),
        MoveTo(x, y),
        Print(format!("┌{}┐", "─".repeat(menu_width as usize - 2)))
    )?;
    for row in 1..menu_height - 1 {
        execute!(stdout, MoveTo(x, y + row), Print("│"))?;
        execute!(stdout, MoveTo(x + menu_width - 1, y + row), Print("│"))?;
    }
    execute!(
        stdout,
        MoveTo(x, y + menu_height - 1),
        Print(format!("└{}┘", "─".repeat(menu_width as usize - 2)))
    )?;

    let title = match app.menu {
        MenuState::NewGame => "New Game",
        MenuState::Theme => "Select Theme",
        MenuState::None => "",
    };
    execute!(
        stdout,
        MoveTo(x + menu_width.saturating_sub(text_width(title)) / 2, y + 1),
        SetForegroundColor(theme.fg),
        Print(title)
    )?;

    let mut list_y = y + 3;
    if has_figure_row {
        let kind = app.session.figure_kind();
        let figure = format!("◀ {} {} ▶", kind.display_name(), kind.symbol());
        execute!(
            stdout,
            MoveTo(x + menu_width.saturating_sub(text_width(&figure)) / 2, list_y),
            SetForegroundColor(theme.key),
            Print(&figure)
        )?;
        list_y += 2;
    }

    for (i, option) in options.iter().enumerate() {
        let selected = i == app.menu_selection;
        let (fg, marker) = if selected {
            (theme.key, "▸ ")
        } else {
            (theme.info, "  ")
        };
        execute!(
            stdout,
            MoveTo(x + 4, list_y + i as u16),
            SetForegroundColor(fg),
            Print(format!("{}{}", marker, option))
        )?;
    }

    Ok(())
}

fn render_win_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    app.win_screen.resize(term_width, term_height);

    let bg_base = Color::Rgb { r: 8, g: 12, b: 20 };

    execute!(stdout, SetBackgroundColor(bg_base))?;
    for y in 0..term_height {
        execute!(stdout, MoveTo(0, y), Print(" ".repeat(term_width as usize)))?;
    }

    for particle in app.win_screen.particles() {
        if particle.is_visible(term_width, term_height) {
            execute!(
                stdout,
                MoveTo(particle.x as u16, particle.y as u16),
                SetForegroundColor(particle.color),
                Print(particle.char)
            )?;
        }
    }

    let lines: Vec<&str> = crate::animations::win_screen::BANNER
        .lines()
        .filter(|l| !l.is_empty())
        .collect();
    let banner_width = lines.iter().map(|l| text_width(l)).max().unwrap_or(40);
    let banner_x = term_width.saturating_sub(banner_width) / 2;
    let banner_y = 3;

    for (i, line) in lines.iter().enumerate() {
        let hue = (app.win_screen.rainbow_offset() + i as f32 * 0.1) % 1.0;
        execute!(
            stdout,
            MoveTo(banner_x, banner_y + i as u16),
            SetForegroundColor(hue_to_rgb(hue)),
            Print(line)
        )?;
    }

    let msg = app.win_screen.current_message();
    let msg_y = banner_y + lines.len() as u16 + 2;
    let hue = (app.win_screen.rainbow_offset() * 2.0) % 1.0;
    execute!(
        stdout,
        MoveTo(term_width.saturating_sub(text_width(msg)) / 2, msg_y),
        SetForegroundColor(hue_to_rgb(hue)),
        Print(msg)
    )?;

    let session = &app.session;
    let size = session.effective_board_size();
    let elapsed = session.last_elapsed().map(|d| d.as_secs_f64());
    let best = session.best_time();
    let mut stats = format!(
        "Board: {}x{} | Time: {} | Best: {}",
        size,
        size,
        elapsed.map(format_time).unwrap_or_else(|| "--:--".to_string()),
        best.map(format_time).unwrap_or_else(|| "--:--".to_string())
    );
    if elapsed.is_some() && elapsed == best {
        stats.push_str(" | New best!");
    }
    execute!(
        stdout,
        MoveTo(term_width.saturating_sub(text_width(&stats) + 2) / 2, msg_y + 3),
        SetForegroundColor(Color::White),
        SetBackgroundColor(Color::Rgb {
            r: 30,
            g: 50,
            b: 30
        }),
        Print(format!(" {} ", stats))
    )?;

    let instr = "Enter: play again   n: new game   b: best times   q: quit";
    execute!(
        stdout,
        MoveTo(term_width.saturating_sub(text_width(instr)) / 2, msg_y + 5),
        SetForegroundColor(Color::Yellow),
        SetBackgroundColor(bg_base),
        Print(instr)
    )?;

    Ok(())
}

fn render_best_times_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let best_times = app.session.best_times();

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let title = "═══ BEST TIMES ═══";
    execute!(
        stdout,
        MoveTo(term_width.saturating_sub(text_width(title)) / 2, 1),
        SetForegroundColor(theme.key),
        Print(title)
    )?;

    let x = term_width.saturating_sub(24) / 2;
    execute!(
        stdout,
        MoveTo(x, 3),
        SetForegroundColor(theme.info),
        Print(format!("{:<12}{:>12}", "Board", "Time"))
    )?;
    execute!(
        stdout,
        MoveTo(x, 4),
        SetForegroundColor(theme.border),
        Print("─".repeat(24))
    )?;

    if best_times.is_empty() {
        execute!(
            stdout,
            MoveTo(x, 5),
            SetForegroundColor(theme.info),
            Print("No games solved yet.")
        )?;
    }

    let current = app.session.effective_board_size();
    for (i, (size, secs)) in best_times.iter().enumerate() {
        let color = if size == current { theme.key } else { theme.fg };
        execute!(
            stdout,
            MoveTo(x, 5 + i as u16),
            SetForegroundColor(color),
            Print(format!(
                "{:<12}{:>12}",
                format!("{}x{}", size, size),
                format_time(secs)
            ))
        )?;
    }

    let footer_y = 6 + best_times.len().max(1) as u16;
    execute!(
        stdout,
        MoveTo(x, footer_y),
        SetForegroundColor(theme.info),
        Print("Esc/b: back")
    )?;

    Ok(())
}
