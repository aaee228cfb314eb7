use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storepilot_core::{Aggregate, AggregateRoot, DomainError, EntityId};
use storepilot_events::Event;

/// Session identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub EntityId);

impl SessionId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Top-level screen the shopper is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    Login,
    StoreEntry,
    Shopping,
}

/// Bottom-bar tab inside the shopping screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Navigate,
    Assistant,
    Cart,
    Profile,
}

/// Aggregate root: Session. Screen and tab flow for one store visit.
///
/// Transitions are strictly forward: Login → StoreEntry → Shopping. Tabs
/// exist only inside the shopping screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    screen: Screen,
    active_tab: Tab,
    version: u64,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            screen: Screen::Login,
            active_tab: Tab::Navigate,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> SessionId {
        self.id
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }
}

impl AggregateRoot for Session {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: SignIn.
///
/// Demo mode: any credentials are accepted; there is no credential check and
/// no failure path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignIn {
    pub session_id: SessionId,
    pub email: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: EnterStore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnterStore {
    pub session_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SelectTab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectTab {
    pub session_id: SessionId,
    pub tab: Tab,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionCommand {
    SignIn(SignIn),
    EnterStore(EnterStore),
    SelectTab(SelectTab),
}

/// Event: SignedIn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedIn {
    pub session_id: SessionId,
    pub email: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StoreEntered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreEntered {
    pub session_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: TabSelected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabSelected {
    pub session_id: SessionId,
    pub tab: Tab,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    SignedIn(SignedIn),
    StoreEntered(StoreEntered),
    TabSelected(TabSelected),
}

impl Event for SessionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::SignedIn(_) => "session.signed_in",
            SessionEvent::StoreEntered(_) => "session.store_entered",
            SessionEvent::TabSelected(_) => "session.tab_selected",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SessionEvent::SignedIn(e) => e.occurred_at,
            SessionEvent::StoreEntered(e) => e.occurred_at,
            SessionEvent::TabSelected(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Session {
    type Command = SessionCommand;
    type Event = SessionEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SessionEvent::SignedIn(_) => {
                self.screen = Screen::StoreEntry;
            }
            SessionEvent::StoreEntered(_) => {
                self.screen = Screen::Shopping;
                self.active_tab = Tab::Navigate;
            }
            SessionEvent::TabSelected(e) => {
                self.active_tab = e.tab;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            SessionCommand::SignIn(cmd) => self.handle_sign_in(cmd),
            SessionCommand::EnterStore(cmd) => self.handle_enter_store(cmd),
            SessionCommand::SelectTab(cmd) => self.handle_select_tab(cmd),
        }
    }
}

impl Session {
    fn ensure_session_id(&self, session_id: SessionId) -> Result<(), DomainError> {
        if self.id != session_id {
            return Err(DomainError::invariant("session_id mismatch"));
        }
        Ok(())
    }

    fn handle_sign_in(&self, cmd: &SignIn) -> Result<Vec<SessionEvent>, DomainError> {
        self.ensure_session_id(cmd.session_id)?;

        if self.screen != Screen::Login {
            return Err(DomainError::conflict("already signed in"));
        }

        Ok(vec![SessionEvent::SignedIn(SignedIn {
            session_id: cmd.session_id,
            email: cmd.email.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_enter_store(&self, cmd: &EnterStore) -> Result<Vec<SessionEvent>, DomainError> {
        self.ensure_session_id(cmd.session_id)?;

        match self.screen {
            Screen::Login => Err(DomainError::invariant("must sign in first")),
            Screen::Shopping => Err(DomainError::conflict("already in the store")),
            Screen::StoreEntry => Ok(vec![SessionEvent::StoreEntered(StoreEntered {
                session_id: cmd.session_id,
                occurred_at: cmd.occurred_at,
            })]),
        }
    }

    fn handle_select_tab(&self, cmd: &SelectTab) -> Result<Vec<SessionEvent>, DomainError> {
        self.ensure_session_id(cmd.session_id)?;

        if self.screen != Screen::Shopping {
            return Err(DomainError::invariant(
                "tabs are only available inside the store",
            ));
        }

        Ok(vec![SessionEvent::TabSelected(TabSelected {
            session_id: cmd.session_id,
            tab: cmd.tab,
            occurred_at: cmd.occurred_at,
        })])
    }
}
