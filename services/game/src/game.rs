//! The terminal game loop.
//!
//! The human plays White through the voice/typed pipeline; Black is the
//! random engine. The loop stays responsive while a capture is in flight:
//! each session invocation runs as a spawned task reporting back over a
//! channel, the gateway's phase channel drives the "Listening…"
//! indicator, and a ticker sweeps the notice queue.

use crate::ai::RandomMover;
use crate::board::{Board, Color};
use crate::notices::NoticeBoard;
use anyhow::Result;
use blindfold_core::{
    CapturePhase, CommandResolution, FeedbackSink, InterpretedCommand, PieceKind, SessionBusy,
    VoiceCommandSession,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{info, warn};

pub struct Game {
    board: Board,
    session: Arc<VoiceCommandSession>,
    notices: Arc<NoticeBoard>,
    engine: RandomMover,
    /// Notices posted at or before this instant have already been printed.
    printed_up_to: Instant,
}

enum TurnOutcome {
    Continue,
    GameOver(String),
}

impl Game {
    pub fn new(session: Arc<VoiceCommandSession>, notices: Arc<NoticeBoard>) -> Self {
        Self {
            board: Board::standard(),
            session,
            notices,
            engine: RandomMover::new(Color::Black),
            printed_up_to: Instant::now(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut phase_rx = self.session.capture_phase();
        let (done_tx, mut done_rx) = mpsc::channel::<Result<CommandResolution, SessionBusy>>(1);

        println!("{}", self.board.render());
        println!("Your move. Speak or type, e.g. \"move pawn e2 e4\". Ctrl-C quits.");
        self.arm(&done_tx);

        let mut sweep = tokio::time::interval(Duration::from_millis(250));
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal. Leaving the game.");
                    break;
                }
                changed = phase_rx.changed() => {
                    if changed.is_ok()
                        && *phase_rx.borrow_and_update() == CapturePhase::Listening
                    {
                        println!("Listening…");
                    }
                }
                Some(result) = done_rx.recv() => {
                    match result {
                        Ok(CommandResolution::Resolved(command)) => {
                            if let TurnOutcome::GameOver(message) = self.human_turn(&command) {
                                println!("{}", message);
                                break;
                            }
                            self.arm(&done_tx);
                        }
                        Ok(CommandResolution::Failed(failure)) => {
                            // The session already posted the feedback line;
                            // the turn stays with the human.
                            info!(kind = ?failure.kind, "command not resolved, re-arming");
                            self.arm(&done_tx);
                        }
                        Err(SessionBusy) => {
                            warn!("session invocation refused: already busy");
                        }
                    }
                }
                _ = sweep.tick() => {
                    self.print_fresh_notices();
                }
            }
        }
        Ok(())
    }

    /// Spawns one session invocation; its result comes back on `done_tx`.
    fn arm(&self, done_tx: &mpsc::Sender<Result<CommandResolution, SessionBusy>>) {
        let session = self.session.clone();
        let tx = done_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(session.interpret().await).await;
        });
    }

    /// Applies the human's command; on success the engine answers.
    fn human_turn(&mut self, command: &InterpretedCommand) -> TurnOutcome {
        match self.board.apply_command(Color::White, command) {
            Ok(applied) => {
                info!(from = %applied.from, to = %applied.to, "white moved");
                if let Some(captured) = applied.captured {
                    println!("You captured the black {}.", captured.kind);
                    if captured.kind == PieceKind::King {
                        return TurnOutcome::GameOver("The black king falls. You win!".to_string());
                    }
                }
                println!("{}", self.board.render());
                self.engine_turn()
            }
            Err(rejection) => {
                // Board rejections are player feedback, same as pipeline
                // failures.
                self.notices.post(&rejection.to_string());
                TurnOutcome::Continue
            }
        }
    }

    fn engine_turn(&mut self) -> TurnOutcome {
        let Some((from, to)) = self.engine.choose(&self.board) else {
            return TurnOutcome::GameOver("Black has no moves left. You win!".to_string());
        };
        match self.board.apply_move(self.engine.color(), from, to) {
            Ok(applied) => {
                info!(from = %applied.from, to = %applied.to, "black moved");
                println!("Black plays {} to {}.", from, to);
                if let Some(captured) = applied.captured {
                    println!("Black captured your {}.", captured.kind);
                    if captured.kind == PieceKind::King {
                        return TurnOutcome::GameOver(
                            "Your king falls. Black wins.".to_string(),
                        );
                    }
                }
                println!("{}", self.board.render());
                TurnOutcome::Continue
            }
            Err(rejection) => {
                // moves_for only yields applicable moves, so this is a bug.
                warn!(%from, %to, error = %rejection, "engine move rejected");
                TurnOutcome::Continue
            }
        }
    }

    /// Prints notices posted since the previous sweep and prunes expired
    /// ones.
    fn print_fresh_notices(&mut self) {
        let now = Instant::now();
        for notice in self.notices.active(now) {
            if notice.posted_at > self.printed_up_to {
                println!("» {}", notice.text);
            }
        }
        self.printed_up_to = now;
    }
}
