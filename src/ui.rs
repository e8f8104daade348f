use crate::board::{Board, Direction};
use crate::consts::{COLS, ROWS};
use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    style::{self, Color, Stylize},
    terminal::{self, ClearType},
};
use std::io::{self, Write};

pub enum InputEvent {
    Dir(Direction),
    Restart,
    Quit,
}

pub struct ConsoleUI;

impl ConsoleUI {
    pub fn init() -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(terminal::EnterAlternateScreen)?;
        stdout.execute(cursor::Hide)?;
        Ok(())
    }

    pub fn cleanup() -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(cursor::Show)?;
        stdout.execute(terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn print_board(board: &Board, message: Option<&str>) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.queue(terminal::Clear(ClearType::All))?;
        stdout.queue(cursor::MoveTo(0, 0))?;

        stdout.queue(style::Print(format!("\r\n {}\r\n\r\n", "2048".bold())))?;

        // Box-drawn board, each cell rendered as
        // ┌───────┐
        // │       │
        // │ 1024  │  <- 7 chars internal
        // │       │
        // └───────┘
        let internal_w = 7;

        let draw_h_line = |out: &mut io::Stdout,
                           left: char,
                           mid: char,
                           cross: char,
                           right: char|
         -> io::Result<()> {
            out.queue(style::Print(" "))?; // Margin
            out.queue(style::Print(left))?;
            for c in 0..COLS {
                for _ in 0..internal_w {
                    out.queue(style::Print(mid))?;
                }
                if c < COLS - 1 {
                    out.queue(style::Print(cross))?;
                }
            }
            out.queue(style::Print(right))?;
            out.queue(style::Print("\r\n"))?;
            Ok(())
        };

        draw_h_line(&mut stdout, '┌', '─', '┬', '┐')?;

        for r in 0..ROWS {
            // 3 text lines per cell row: padding, value, padding.
            for line_idx in 0..3 {
                stdout.queue(style::Print(" │"))?;
                for c in 0..COLS {
                    let val = board.value_at(r, c);
                    let content_str = if line_idx == 1 && val != 0 {
                        format!("{:^width$}", val, width = internal_w)
                    } else {
                        " ".repeat(internal_w)
                    };

                    let styled = Self::style_cell(&content_str, val);
                    stdout.queue(style::Print(styled))?;

                    if c < COLS - 1 {
                        stdout.queue(style::Print("│"))?;
                    }
                }
                stdout.queue(style::Print("│\r\n"))?;
            }

            if r < ROWS - 1 {
                draw_h_line(&mut stdout, '├', '─', '┼', '┤')?;
            } else {
                draw_h_line(&mut stdout, '└', '─', '┴', '┘')?;
            }
        }

        stdout.queue(style::Print("\r\n"))?;
        if let Some(msg) = message {
            stdout.queue(style::Print(format!(" {}\r\n\r\n", msg.red().bold())))?;
        } else {
            stdout.queue(style::Print("\r\n\r\n"))?;
        }

        stdout.queue(style::Print(" Controls: ".grey()))?;
        stdout.queue(style::Print(
            "[Arrows/WASD] Move  [R] Restart  [Q] Quit\r\n",
        ))?;

        stdout.flush()?;
        Ok(())
    }

    fn style_cell(content: &str, val: u32) -> style::StyledContent<&str> {
        match val {
            0 => content.reset(), // Empty
            2 | 4 => content.with(Color::Black).on(Color::White),
            8 | 16 | 32 | 64 => content.with(Color::White).on(Color::DarkYellow),
            128 | 256 | 512 | 1024 => content.with(Color::Black).on(Color::Yellow),
            // Past the table: same base style the window uses as fallback.
            _ => content.with(Color::Black).on(Color::White),
        }
    }

    pub fn get_input() -> io::Result<InputEvent> {
        loop {
            if event::poll(std::time::Duration::from_millis(50))? {
                if let Event::Key(KeyEvent {
                    code, modifiers, ..
                }) = event::read()?
                {
                    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                        return Ok(InputEvent::Quit);
                    }
                    match code {
                        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                            return Ok(InputEvent::Dir(Direction::Up));
                        }
                        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                            return Ok(InputEvent::Dir(Direction::Down));
                        }
                        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                            return Ok(InputEvent::Dir(Direction::Left));
                        }
                        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                            return Ok(InputEvent::Dir(Direction::Right));
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            return Ok(InputEvent::Restart);
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(InputEvent::Quit);
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    pub fn wait_for_enter() -> io::Result<()> {
        loop {
            if event::poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                    if code == KeyCode::Enter || code == KeyCode::Char(' ') || code == KeyCode::Char('q') {
                        return Ok(());
                    }
                }
            }
        }
    }
}
