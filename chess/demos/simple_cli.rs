// Simple command-line application to play chess for two players at one terminal
//
// Moves are entered as two squares, e.g. "6,4 4,4". Run with `RUST_LOG=debug` to see what the
// engine does.

use kingsafe::{board::PrettyStyle, BoardSize, Color, Coord, Game, GameStatus, Rules};
use std::env;
use std::io::{self, BufRead, Write};

fn parse_move(s: &str) -> Option<(Coord, Coord)> {
    let (src, dst) = s.split_once(' ')?;
    Some((src.trim().parse().ok()?, dst.trim().parse().ok()?))
}

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let size = match args.next().map(|s| s.parse::<usize>()) {
        None => BoardSize::STANDARD,
        Some(Ok(n)) => match BoardSize::new(n) {
            Ok(size) => size,
            Err(e) => {
                eprintln!("Bad board size: {}", e);
                return;
            }
        },
        Some(Err(e)) => {
            eprintln!("Bad board size: {}", e);
            return;
        }
    };
    let rules = match args.next().map(|s| s.parse()) {
        None => Rules::default(),
        Some(Ok(castling)) => Rules { castling },
        Some(Err(e)) => {
            eprintln!("Bad castling rules: {}", e);
            return;
        }
    };

    let mut stdin = io::stdin().lock();
    let mut game = Game::with_rules(kingsafe::initialise(size).board, Color::White, rules);

    loop {
        println!("{}", game.board().pretty(PrettyStyle::Utf8));
        match game.status() {
            GameStatus::Checkmate => {
                println!("Checkmate! {:?} wins", game.side().inv());
                break;
            }
            GameStatus::Stalemate => {
                println!("Stalemate!");
                break;
            }
            GameStatus::Check => println!("Check!"),
            GameStatus::InProgress => {}
        }

        let side = match game.side() {
            Color::White => "White",
            Color::Black => "Black",
        };
        print!("{} move: ", side);
        io::stdout().flush().unwrap();
        let mut s = String::new();
        if stdin.read_line(&mut s).unwrap() == 0 {
            break;
        }
        let s = s.trim();

        let Some((src, dst)) = parse_move(s) else {
            println!("Bad move: expected \"row,col row,col\"");
            println!();
            continue;
        };
        if let Err(e) = game.push(src, dst) {
            println!("Bad move: {}", e);
            let legal = game.legal_moves(src);
            if !legal.is_empty() {
                let hint: Vec<String> = legal.iter().map(|c| c.to_string()).collect();
                println!("Legal moves from {}: {}", src, hint.join(" "));
            }
        }
        println!();
    }

    println!("Final position: {}", game.board().as_wire());
}
