use std::io::{self, BufRead, Write};

use clap::Subcommand;
use studykit_core::store::Database;
use studykit_core::Deck;

#[derive(Subcommand)]
pub enum CardAction {
    /// Add a card to the end of the deck
    Add {
        /// Front (question) side
        front: String,
        /// Back (answer) side
        back: String,
    },
    /// List all cards in deck order
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Remove one card
    Remove {
        /// Card id
        id: String,
    },
    /// Shuffle the deck
    Shuffle,
    /// Delete every card
    DeleteAll,
    /// Show deck counters
    Stats,
    /// Interactive study loop on stdin
    Study,
}

pub fn run(action: CardAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Database::open()?;
    let mut deck = Deck::load(store)?;

    match action {
        CardAction::Add { front, back } => {
            let card = deck.add(&front, &back)?;
            println!("added {}", card.id);
        }
        CardAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&deck.cards())?);
            } else if deck.is_empty() {
                println!("no cards yet");
            } else {
                for card in deck.cards() {
                    println!("{} -- {}  ({})", card.front, card.back, card.id);
                }
            }
        }
        CardAction::Remove { id } => {
            let card = deck.remove(&id)?;
            println!("removed {}", card.id);
        }
        CardAction::Shuffle => {
            deck.shuffle(&mut rand::thread_rng())?;
            println!("deck shuffled ({} cards)", deck.len());
        }
        CardAction::DeleteAll => {
            let removed = deck.delete_all()?;
            println!("deleted {removed} card(s)");
        }
        CardAction::Stats => {
            let stats = deck.stats();
            println!(
                "cards: {}  position: {}  progress: {}%",
                stats.total, stats.position, stats.percent
            );
        }
        CardAction::Study => study(&mut deck)?,
    }

    Ok(())
}

/// One study session: the cursor and flip state live exactly as long as
/// this loop.
fn study(deck: &mut Deck<Database>) -> Result<(), Box<dyn std::error::Error>> {
    if deck.is_empty() {
        println!("no cards to study");
        return Ok(());
    }

    let stdin = io::stdin();
    loop {
        let Some(card) = deck.current() else { break };
        let side = if deck.is_flipped() {
            &card.back
        } else {
            &card.front
        };
        let stats = deck.stats();
        println!("[{}/{}] {}", stats.position, stats.total, side);
        print!("(n)ext (p)rev (f)lip (s)huffle (r)ewind (q)uit > ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "n" | "next" => {
                deck.next();
            }
            "p" | "prev" => {
                deck.previous();
            }
            "f" | "flip" => {
                deck.flip();
            }
            "s" | "shuffle" => deck.shuffle(&mut rand::thread_rng())?,
            "r" | "rewind" => deck.reset_study(),
            "q" | "quit" => break,
            _ => {}
        }
    }
    Ok(())
}
