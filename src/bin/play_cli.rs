use log::info;
use std::io;
use twenty48_rs::board::Board;
use twenty48_rs::ui::{ConsoleUI, InputEvent};

fn main() -> io::Result<()> {
    env_logger::init();

    ConsoleUI::init()?;
    let result = run();
    ConsoleUI::cleanup()?;
    result
}

fn run() -> io::Result<()> {
    let mut rng = rand::rng();
    let mut board = Board::new(&mut rng);

    loop {
        ConsoleUI::print_board(&board, None)?;
        match ConsoleUI::get_input()? {
            InputEvent::Quit => break,
            InputEvent::Restart => {
                info!("restarting");
                board = Board::new(&mut rng);
            }
            InputEvent::Dir(direction) => {
                board.apply_move(direction);
                if board.spawn_random_tile(&mut rng).is_none() {
                    info!("board full after {:?} move, game over", direction);
                    ConsoleUI::print_board(&board, Some("Game over! Press Enter to exit."))?;
                    ConsoleUI::wait_for_enter()?;
                    break;
                }
            }
        }
    }

    Ok(())
}
