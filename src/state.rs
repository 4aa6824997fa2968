use self::game_phases::{GamePhase, IsShrinking};
use crate::entity::Player;

/// Plain view of where the game is, the typed phases below are the only
/// way to move between these
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    PreIntro,
    Intro,
    Start,
    Running,
    GameOver,
}

/// Full-screen text shown over the arena
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Overlay {
    PreIntro,
    Start,
    GameOver,
}

impl Overlay {
    pub const TITLE: &'static str = "The zombie guild";

    pub fn subtitle(self) -> &'static str {
        match self {
            Overlay::PreIntro => "Click to Continue",
            Overlay::Start => "Click to Start",
            Overlay::GameOver => "Game Over",
        }
    }
}

impl GameState {
    /// Visibility is a pure function of the state, at most one overlay
    pub fn overlay(self) -> Option<Overlay> {
        match self {
            GameState::PreIntro => Some(Overlay::PreIntro),
            GameState::Start => Some(Overlay::Start),
            GameState::GameOver => Some(Overlay::GameOver),
            GameState::Intro | GameState::Running => None,
        }
    }
}

/// ┌──────────────── State Transition Flow ──────────────────┐
/// │  From State  →  Event        →  To State                │
/// ├─────────────────────────────────────────────────────────┤
/// │  PreIntro    →  Confirm      →  Intro                   │
/// │  Start       →  Confirm      →  Running                 │
/// │  any*        →  PlayerDied   →  GameOver                │
/// │  -------        ------                                  │
/// │  PreIntro    →  Update       →  PreIntro (scale = 4)    │
/// │  Intro       →  Update       →  Start (when scale <= 1) │
/// └─────────────────────────────────────────────────────────┘
/// * GameOver is terminal, nothing leaves it
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    Confirm,
    PlayerDied,
    Update,
}

/// All code relating to individual phases sits behind this mod block, so a
/// transition can only happen through the methods provided :
/// - PUBLIC  : GamePhase, its markers and IsShrinking
/// - PRIVATE : the phase context
mod game_phases {
    use crate::entity::Player;

    #[derive(Debug, Copy, Clone, PartialEq)]
    pub struct PreIntro;
    #[derive(Debug, Copy, Clone, PartialEq)]
    pub struct Intro;
    #[derive(Debug, Copy, Clone, PartialEq)]
    pub struct Start;
    #[derive(Debug, Copy, Clone, PartialEq)]
    pub struct Running;
    #[derive(Debug, Copy, Clone, PartialEq)]
    pub struct GameOver;

    pub enum IsShrinking {
        Done(GamePhase<Start>),
        InProgress(GamePhase<Intro>),
    }

    #[derive(Debug, Copy, Clone, PartialEq)]
    struct PhaseContext {
        // ticks spent in the current phase
        ticks: u64,
        intro_scale: f64,
        shrink_step: f64,
    }

    impl PhaseContext {
        fn tick(mut self) -> Self {
            self.ticks += 1;
            self
        }

        /// reset the counter on every transition
        fn on_state_transition(mut self) -> Self {
            self.ticks = 0;
            self
        }
    }

    #[derive(Debug, Copy, Clone, PartialEq)]
    pub struct GamePhase<S> {
        context: PhaseContext,
        // type-level tracking only, never read
        _state: S,
    }

    impl<S> GamePhase<S> {
        pub fn ticks(&self) -> u64 {
            self.context.ticks
        }

        /// any phase can end in death
        pub fn die(self) -> GamePhase<GameOver> {
            GamePhase {
                context: self.context.on_state_transition(),
                _state: GameOver,
            }
        }
    }

    impl GamePhase<PreIntro> {
        pub fn new(intro_scale: f64, shrink_step: f64) -> Self {
            GamePhase {
                context: PhaseContext {
                    ticks: 0,
                    intro_scale,
                    shrink_step,
                },
                _state: PreIntro,
            }
        }

        /// force the magnified scale every tick, undoing any drift
        pub fn update(mut self, player: &mut Player) -> Self {
            player.set_scale(self.context.intro_scale);
            self.context = self.context.tick();
            self
        }

        pub fn confirm(self) -> GamePhase<Intro> {
            GamePhase {
                context: self.context.on_state_transition(),
                _state: Intro,
            }
        }
    }

    impl GamePhase<Intro> {
        /// Returns an enum because the intro can :
        /// - End      (Done)       : scale reached 1 this tick
        /// - Continue (InProgress)
        ///
        /// The scale is derived from the tick count rather than repeatedly
        /// subtracted, so it is exactly max(1, initial - step * ticks).
        pub fn update(mut self, player: &mut Player) -> IsShrinking {
            self.context = self.context.tick();
            let scale = self.context.intro_scale - self.context.shrink_step * self.context.ticks as f64;
            player.set_scale(scale.max(1.0));
            if scale <= 1.0 {
                IsShrinking::Done(self.finish())
            } else {
                IsShrinking::InProgress(self)
            }
        }

        fn finish(self) -> GamePhase<Start> {
            GamePhase {
                context: self.context.on_state_transition(),
                _state: Start,
            }
        }
    }

    impl GamePhase<Start> {
        pub fn update(mut self) -> Self {
            self.context = self.context.tick();
            self
        }

        pub fn confirm(self) -> GamePhase<Running> {
            GamePhase {
                context: self.context.on_state_transition(),
                _state: Running,
            }
        }
    }

    impl GamePhase<Running> {
        pub fn update(mut self) -> Self {
            self.context = self.context.tick();
            self
        }
    }

    impl GamePhase<GameOver> {
        pub fn update(mut self) -> Self {
            self.context = self.context.tick();
            self
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GameStateMachine {
    PreIntro(GamePhase<game_phases::PreIntro>),
    Intro(GamePhase<game_phases::Intro>),
    Start(GamePhase<game_phases::Start>),
    Running(GamePhase<game_phases::Running>),
    GameOver(GamePhase<game_phases::GameOver>),
}

impl From<GamePhase<game_phases::PreIntro>> for GameStateMachine {
    fn from(phase: GamePhase<game_phases::PreIntro>) -> Self {
        GameStateMachine::PreIntro(phase)
    }
}

impl From<GamePhase<game_phases::Intro>> for GameStateMachine {
    fn from(phase: GamePhase<game_phases::Intro>) -> Self {
        GameStateMachine::Intro(phase)
    }
}

impl From<GamePhase<game_phases::Start>> for GameStateMachine {
    fn from(phase: GamePhase<game_phases::Start>) -> Self {
        GameStateMachine::Start(phase)
    }
}

impl From<GamePhase<game_phases::Running>> for GameStateMachine {
    fn from(phase: GamePhase<game_phases::Running>) -> Self {
        GameStateMachine::Running(phase)
    }
}

impl From<GamePhase<game_phases::GameOver>> for GameStateMachine {
    fn from(phase: GamePhase<game_phases::GameOver>) -> Self {
        GameStateMachine::GameOver(phase)
    }
}

impl From<IsShrinking> for GameStateMachine {
    fn from(is_shrinking: IsShrinking) -> Self {
        match is_shrinking {
            IsShrinking::Done(start) => start.into(),
            IsShrinking::InProgress(intro) => intro.into(),
        }
    }
}

impl GameStateMachine {
    pub fn new(intro_scale: f64, shrink_step: f64) -> Self {
        GamePhase::new(intro_scale, shrink_step).into()
    }

    /// CONSUMING self and returning the next state, the old one can't be
    /// used by accident afterwards
    pub fn transition(self, event: Event, player: &mut Player) -> Self {
        use GameStateMachine::*;
        match (self, event) {
            (GameOver(phase), Event::Update) => phase.update().into(),
            (GameOver(_), _) => self,
            (PreIntro(phase), Event::PlayerDied) => phase.die().into(),
            (Intro(phase), Event::PlayerDied) => phase.die().into(),
            (Start(phase), Event::PlayerDied) => phase.die().into(),
            (Running(phase), Event::PlayerDied) => phase.die().into(),
            (PreIntro(phase), Event::Confirm) => phase.confirm().into(),
            (Start(phase), Event::Confirm) => phase.confirm().into(),
            (PreIntro(phase), Event::Update) => phase.update(player).into(),
            (Intro(phase), Event::Update) => phase.update(player).into(),
            (Start(phase), Event::Update) => phase.update().into(),
            (Running(phase), Event::Update) => phase.update().into(),
            // confirm is ignored while the intro plays and while running
            (Intro(_), Event::Confirm) | (Running(_), Event::Confirm) => self,
        }
    }

    pub fn state(&self) -> GameState {
        match self {
            GameStateMachine::PreIntro(_) => GameState::PreIntro,
            GameStateMachine::Intro(_) => GameState::Intro,
            GameStateMachine::Start(_) => GameState::Start,
            GameStateMachine::Running(_) => GameState::Running,
            GameStateMachine::GameOver(_) => GameState::GameOver,
        }
    }

    /// Ticks spent in the current state
    pub fn ticks(&self) -> u64 {
        match self {
            GameStateMachine::PreIntro(phase) => phase.ticks(),
            GameStateMachine::Intro(phase) => phase.ticks(),
            GameStateMachine::Start(phase) => phase.ticks(),
            GameStateMachine::Running(phase) => phase.ticks(),
            GameStateMachine::GameOver(phase) => phase.ticks(),
        }
    }
}
