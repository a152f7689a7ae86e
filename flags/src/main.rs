use std::{
    cell::RefCell,
    fmt,
    io::{self, BufRead},
    path::Path,
    process,
    time::Duration,
};

use clap::{value_t, App, Arg, ArgMatches};
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

use flagwar::{
    board::{BoardConfig, BoardSetup, TerrainDensity},
    game::{
        HeuristicConfig, HeuristicPlayer, MoveSource, NullSink, OutcomeSink, RoundConfig,
        ScriptedPlayer, Session,
    },
    ships::Side,
};

use crate::{
    keyboard::{InputReader, KeyboardPlayer},
    render::TextRenderer,
};

mod files;
mod keyboard;
mod render;

fn main() {
    env_logger::init();
    let matches = App::new("Flags")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Two-player capture-the-flag played with numbered ships on a grid.")
        .arg(
            Arg::with_name("board")
                .short("b")
                .long("board")
                .value_name("BOARD")
                .help("\"random\" or a directory of .gboard files, one round per file")
                .default_value("random"),
        )
        .arg(
            Arg::with_name("player_a")
                .short("a")
                .long("player-a")
                .value_name("KIND")
                .help("who plays side A")
                .possible_values(&["keyboard", "file", "algo"])
                .case_insensitive(true)
                .default_value("keyboard"),
        )
        .arg(
            Arg::with_name("player_b")
                .short("p")
                .long("player-b")
                .value_name("KIND")
                .help("who plays side B")
                .possible_values(&["keyboard", "file", "algo"])
                .case_insensitive(true)
                .default_value("algo"),
        )
        .arg(
            Arg::with_name("rounds")
                .short("r")
                .long("rounds")
                .value_name("N")
                .help("number of random rounds to play")
                .default_value("1"),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .value_name("W")
                .default_value("13"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .value_name("H")
                .default_value("13"),
        )
        .arg(
            Arg::with_name("density")
                .long("density")
                .value_name("DENSITY")
                .help("amount of sea and forest on random boards")
                .possible_values(&["low", "regular", "high"])
                .case_insensitive(true)
                .default_value("regular"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("seed for board generation and automated players"),
        )
        .arg(
            Arg::with_name("max_turns")
                .long("max-turns")
                .value_name("N")
                .help("turns after which a round is a draw, 0 for no limit")
                .default_value("1000"),
        )
        .arg(
            Arg::with_name("reverse")
                .long("reverse")
                .help("side B moves first"),
        )
        .arg(
            Arg::with_name("fallback")
                .long("fallback")
                .help("automated players step around obstacles instead of wasting the turn"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("only print round results"),
        )
        .arg(
            Arg::with_name("delay")
                .short("d")
                .long("delay")
                .value_name("MS")
                .help("pause between turns in milliseconds")
                .default_value("0"),
        )
        .get_matches();

    let options = Options::from_matches(&matches);
    if let Err(err) = run(&matches, &options) {
        eprintln!("flags: {}", err);
        process::exit(1);
    }
}

/// Who plays a side.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum PlayerKind {
    Keyboard,
    File,
    Algo,
}

impl PlayerKind {
    fn from_arg(arg: &str) -> Self {
        match arg.to_ascii_lowercase().as_str() {
            "keyboard" => PlayerKind::Keyboard,
            "file" => PlayerKind::File,
            "algo" => PlayerKind::Algo,
            _ => unreachable!(),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            PlayerKind::Keyboard => "keyboard",
            PlayerKind::File => "file",
            PlayerKind::Algo => "heuristic",
        })
    }
}

/// Settings collected from the command line.
struct Options {
    players: [PlayerKind; 2],
    board: BoardConfig,
    round: RoundConfig,
    rounds: usize,
    seed: Option<u64>,
    fallback: bool,
    quiet: bool,
    delay: Duration,
}

impl Options {
    /// Read the options, exiting with a usage error on malformed values.
    fn from_matches(matches: &ArgMatches) -> Self {
        let density = match matches
            .value_of("density")
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("low") => TerrainDensity::LOW,
            Some("high") => TerrainDensity::HIGH,
            _ => TerrainDensity::REGULAR,
        };
        let seed = if matches.is_present("seed") {
            Some(value_t!(matches, "seed", u64).unwrap_or_else(|e| e.exit()))
        } else {
            None
        };
        let max_turns = value_t!(matches, "max_turns", usize).unwrap_or_else(|e| e.exit());
        Self {
            players: [
                PlayerKind::from_arg(matches.value_of("player_a").unwrap_or("keyboard")),
                PlayerKind::from_arg(matches.value_of("player_b").unwrap_or("algo")),
            ],
            board: BoardConfig {
                width: value_t!(matches, "width", usize).unwrap_or_else(|e| e.exit()),
                height: value_t!(matches, "height", usize).unwrap_or_else(|e| e.exit()),
                density,
            },
            round: RoundConfig {
                first: if matches.is_present("reverse") {
                    Side::PlayerB
                } else {
                    Side::PlayerA
                },
                max_turns: if max_turns == 0 { None } else { Some(max_turns) },
            },
            rounds: value_t!(matches, "rounds", usize).unwrap_or_else(|e| e.exit()),
            seed,
            fallback: matches.is_present("fallback"),
            quiet: matches.is_present("quiet"),
            delay: Duration::from_millis(
                value_t!(matches, "delay", u64).unwrap_or_else(|e| e.exit()),
            ),
        }
    }

    fn player(&self, side: Side) -> PlayerKind {
        self.players[side.index()]
    }
}

fn run(matches: &ArgMatches, options: &Options) -> io::Result<()> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let stdin = io::stdin();
    let input = RefCell::new(InputReader::new(stdin.lock()));
    let mut sink: Box<dyn OutcomeSink> = if options.quiet {
        Box::new(NullSink)
    } else {
        Box::new(TextRenderer::new(options.delay))
    };
    let mut session = Session::new(
        format!("{} ({})", Side::PlayerA, options.player(Side::PlayerA)),
        format!("{} ({})", Side::PlayerB, options.player(Side::PlayerB)),
    );

    match matches.value_of("board") {
        Some(dir) if dir != "random" => {
            for path in files::board_files(Path::new(dir))? {
                info!("[Main] playing {}", path.display());
                let setup = files::load_board(&path)?;
                let round = RoundInput {
                    setup,
                    board_file: Some(path.as_path()),
                };
                play_round(&mut session, round, options, &mut rng, &input, &mut *sink)?;
                if session.should_quit() {
                    break;
                }
            }
        }
        _ => {
            if options.players.contains(&PlayerKind::File) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "file players need a directory of board files",
                ));
            }
            for _ in 0..options.rounds {
                let setup = BoardSetup::random(&options.board, &mut rng)
                    .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
                let round = RoundInput {
                    setup,
                    board_file: None,
                };
                play_round(&mut session, round, options, &mut rng, &input, &mut *sink)?;
                if session.should_quit() {
                    break;
                }
            }
        }
    }

    print_summary(&session);
    Ok(())
}

/// Board of one round and the file it came from, if any.
struct RoundInput<'p> {
    setup: BoardSetup,
    board_file: Option<&'p Path>,
}

fn play_round<B: BufRead>(
    session: &mut Session,
    round: RoundInput,
    options: &Options,
    rng: &mut StdRng,
    input: &RefCell<InputReader<B>>,
    sink: &mut dyn OutcomeSink,
) -> io::Result<()> {
    let mut a = make_player(Side::PlayerA, round.board_file, options, rng, input)?;
    let mut b = make_player(Side::PlayerB, round.board_file, options, rng, input)?;
    let state = session
        .play_round(round.setup, options.round, &mut *a, &mut *b, sink)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    println!("Round {}: {}", session.rounds_played(), state);
    Ok(())
}

/// Build the player for `side`.
fn make_player<'a, B: BufRead + 'a>(
    side: Side,
    board_file: Option<&Path>,
    options: &Options,
    rng: &mut StdRng,
    input: &'a RefCell<InputReader<B>>,
) -> io::Result<Box<dyn MoveSource + 'a>> {
    let name = format!("{}", side);
    let player: Box<dyn MoveSource + 'a> = match options.player(side) {
        PlayerKind::Keyboard => Box::new(KeyboardPlayer::new(name, input, options.quiet)),
        PlayerKind::Algo => Box::new(HeuristicPlayer::with_config(
            StdRng::seed_from_u64(rng.gen()),
            HeuristicConfig {
                fallback: options.fallback,
            },
        )),
        PlayerKind::File => {
            let board_file = board_file.ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "no board file for moves")
            })?;
            let moves = files::load_moves(&files::moves_path(board_file, side))?;
            Box::new(ScriptedPlayer::new(name, moves))
        }
    };
    Ok(player)
}

fn print_summary(session: &Session) {
    println!();
    println!("Game Summary");
    println!("Rounds played: {}", session.rounds_played());
    for &side in Side::ALL.iter() {
        let score = session.score(side);
        println!(
            "{}: {} points ({} won, {} lost)",
            score.name, score.points, score.wins, score.losses
        );
    }
}
