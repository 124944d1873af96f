//! The interactive menu session.
//!
//! A session owns a fresh `SecretStore` for its whole lifetime and talks
//! to the user only through an injected `Prompter`.  Every screen ends by
//! setting a one-line notification that is shown above the next menu.

use console::style;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::prompt::Prompter;
use crate::config::Settings;
use crate::errors::Result;
use crate::store::SecretStore;

/// Main menu entries, in display order.
const MENU_ITEMS: [&str; 4] = [
    "Create a new message.",
    "Access a message.",
    "Store summary.",
    "Exit",
];

/// A main menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Create,
    Access,
    Summary,
    Exit,
}

impl MenuChoice {
    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Create),
            1 => Some(Self::Access),
            2 => Some(Self::Summary),
            3 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Severity of the status line shown above the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Navigation,
    Action,
    Warning,
    Error,
}

/// The status line shown above the next menu.
///
/// It may carry a released message, so its text is wiped when replaced.
#[derive(Debug)]
pub struct Notification {
    pub kind: NoticeKind,
    pub text: Zeroizing<String>,
}

impl Notification {
    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: Zeroizing::new(text.into()),
        }
    }

    fn tag(&self) -> &'static str {
        match self.kind {
            NoticeKind::Navigation => "[NAVIGATION]",
            NoticeKind::Action => "[ACTION]",
            NoticeKind::Warning => "[WARNING]",
            NoticeKind::Error => "[ERROR]",
        }
    }

    fn render(&self) {
        let line = format!("{} {}", self.tag(), self.text.as_str());
        let styled = match self.kind {
            NoticeKind::Navigation => style(line).yellow(),
            NoticeKind::Action => style(line).green(),
            NoticeKind::Warning => style(line).yellow().bold(),
            NoticeKind::Error => style(line).red(),
        };
        println!("{styled}");
    }
}

/// An interactive session over one in-memory store.
pub struct Session<P: Prompter> {
    store: SecretStore,
    settings: Settings,
    prompter: P,
    notification: Option<Notification>,
}

impl<P: Prompter> Session<P> {
    pub fn new(settings: Settings, prompter: P) -> Self {
        Self {
            store: SecretStore::new(),
            settings,
            prompter,
            notification: None,
        }
    }

    /// Run the menu loop until the user chooses Exit.
    ///
    /// Retrieval and input failures are reported on the status line and
    /// the loop continues; prompt or terminal failures end the session.
    /// The store is cleared (and its secrets wiped) on the way out.
    pub fn run(&mut self) -> Result<()> {
        let outcome = self.menu_loop();
        self.store.clear();
        outcome
    }

    fn menu_loop(&mut self) -> Result<()> {
        loop {
            self.show_screen("Top Secret Message Menu")?;
            let index = self
                .prompter
                .select("What would you like to do?", &MENU_ITEMS)?;

            let Some(choice) = MenuChoice::from_index(index) else {
                self.notify(NoticeKind::Error, "Invalid main menu option selected.");
                continue;
            };

            if choice == MenuChoice::Exit {
                tracing::debug!("session ended by user");
                return Ok(());
            }
            self.dispatch(choice)?;
        }
    }

    /// Run a single menu action.
    pub fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        let result = match choice {
            MenuChoice::Create => {
                self.notify(NoticeKind::Navigation, "Entering message creation module.");
                self.create_message()
            }
            MenuChoice::Access => {
                self.notify(NoticeKind::Navigation, "Entering message access module.");
                self.access_message()
            }
            MenuChoice::Summary => {
                self.notify(NoticeKind::Navigation, "Entering store summary.");
                self.show_summary()
            }
            MenuChoice::Exit => Ok(()),
        };

        match result {
            Err(e) if e.is_request_error() => {
                self.notify(NoticeKind::Error, e.to_string());
                Ok(())
            }
            other => other,
        }
    }

    /// Collect a new message and hand it to the store.
    fn create_message(&mut self) -> Result<()> {
        self.show_screen("Create New Top Secret Message")?;

        let id = self.prompter.read_id("Provide a unique message ID")?;
        let password = self.prompter.read_password("Provide the password")?;
        self.settings.validate_password(&password)?;
        let message = self.prompter.read_text("Provide your message")?;
        self.settings.validate_message(&message)?;
        let attempts = self.prompter.read_attempts(
            "Provide the maximum number of attempts to access your message",
            self.settings.default_attempts,
        )?;
        let attempts = self.settings.validate_attempts(attempts)?;

        if self.store.insert(id, &password, &message, attempts) {
            self.notify(
                NoticeKind::Action,
                "Message successfully submitted to database.",
            );
        } else {
            // Duplicate ids leave the existing message untouched.
            self.notify(
                NoticeKind::Warning,
                format!("A message with UID {id} already exists; nothing was stored."),
            );
        }
        Ok(())
    }

    /// Ask for an id and password and try to release the message.
    fn access_message(&mut self) -> Result<()> {
        self.show_screen("Access a Top Secret Message")?;

        let id = self.prompter.read_id("Provide the message ID")?;
        let password = self.prompter.read_password("Provide the password")?;

        let message = Zeroizing::new(self.store.try_retrieve(id, &password)?);
        self.notify(
            NoticeKind::Action,
            format!("Message successfully retrieved: {}", message.as_str()),
        );
        Ok(())
    }

    /// Show counts and the id range; never any credential or payload.
    fn show_summary(&mut self) -> Result<()> {
        self.show_screen("Store Summary")?;

        // Both queries only fail with Underflow, i.e. an empty store.
        let lowest = self.store.find_min().ok();
        let highest = self.store.find_max().ok();
        output::print_summary(self.store.len(), lowest, highest);

        self.prompter.select("Return to the main menu", &["Back"])?;
        self.notify(
            NoticeKind::Navigation,
            format!("Store holds {} message(s).", self.store.len()),
        );
        Ok(())
    }

    fn show_screen(&mut self, title: &str) -> Result<()> {
        if self.settings.clear_screen {
            self.prompter.clear_screen()?;
        }
        if let Some(notice) = &self.notification {
            notice.render();
        }
        output::banner(title);
        Ok(())
    }

    fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notification = Some(Notification::new(kind, text));
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The status line that will be shown above the next menu.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Read-only view of the underlying store.
    pub fn store(&self) -> &SecretStore {
        &self.store
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }
}
