use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::error;

use quizguess::{AdminSession, GameController, GameError, Session};

const MAX_NAME_LEN: usize = 24;
const MAX_WORD_LEN: usize = 24;
const MAX_CREDENTIAL_LEN: usize = 32;

#[derive(Clone, Copy, PartialEq)]
pub enum Tab {
    Play,
    Admin,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Play, Tab::Admin]
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Play => " 🎮 Play Game ",
            Tab::Admin => " 🔐 Admin Panel ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Play => 0,
            Tab::Admin => 1,
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum AdminTab {
    Add,
    View,
    Remove,
}

impl AdminTab {
    pub fn all() -> &'static [AdminTab] {
        &[AdminTab::Add, AdminTab::View, AdminTab::Remove]
    }

    pub fn title(&self) -> &str {
        match self {
            AdminTab::Add => " 📝 Add Words ",
            AdminTab::View => " 📋 View Words ",
            AdminTab::Remove => " 🗑 Remove Words ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AdminTab::Add => 0,
            AdminTab::View => 1,
            AdminTab::Remove => 2,
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum CredentialField {
    Username,
    Password,
}

#[derive(Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

pub struct AdminPanel {
    pub session: Option<AdminSession>,
    pub username: String,
    pub password: String,
    pub focus: CredentialField,
    pub tab: AdminTab,
    pub category_idx: usize,
    pub word_idx: usize,
    pub word_input: String,
    pub notice: Option<Notice>,
}

impl AdminPanel {
    fn new() -> Self {
        Self {
            session: None,
            username: String::new(),
            password: String::new(),
            focus: CredentialField::Username,
            tab: AdminTab::Add,
            category_idx: 0,
            word_idx: 0,
            word_input: String::new(),
            notice: None,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub controller: GameController,
    pub session: Option<Session>,
    pub name_input: String,
    pub guess_input: String,
    pub notice: Option<Notice>,
    pub admin: AdminPanel,
}

impl App {
    pub fn new(controller: GameController) -> Self {
        Self {
            should_quit: false,
            current_tab: Tab::Play,
            controller,
            session: None,
            name_input: String::new(),
            guess_input: String::new(),
            notice: None,
            admin: AdminPanel::new(),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            _ => {}
        }

        match self.current_tab {
            Tab::Play => self.handle_play_input(key),
            Tab::Admin => self.handle_admin_input(key),
        }
    }

    fn handle_play_input(&mut self, key: KeyEvent) {
        let Some(session) = self.session.as_mut() else {
            self.handle_name_input(key);
            return;
        };

        if session.round().is_finished() {
            match key.code {
                KeyCode::Enter => {
                    let result = self.controller.new_round(session);
                    self.report(result);
                }
                KeyCode::Esc => self.logout(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Enter => {
                let guess = std::mem::take(&mut self.guess_input);
                let result = self.controller.submit_guess(session, &guess);
                match result {
                    // Guess errors already show up as round feedback.
                    Err(GameError::Guess(_)) => {}
                    other => self.report(other),
                }
            }
            KeyCode::Backspace => self.guess_input.clear(),
            KeyCode::Esc => self.logout(),
            // One character box: typing replaces the previous letter.
            KeyCode::Char(c) if !c.is_control() => self.guess_input = c.to_string(),
            _ => {}
        }
    }

    fn handle_name_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => match self.controller.login(&self.name_input) {
                Ok(session) => {
                    self.session = Some(session);
                    self.name_input.clear();
                    self.guess_input.clear();
                    self.notice = None;
                }
                Err(GameError::InvalidName) => {
                    self.notice = Some(Notice::Warning(GameError::InvalidName.to_string()));
                }
                Err(err) => self.report_error(err),
            },
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c) => {
                if self.name_input.chars().count() < MAX_NAME_LEN && !c.is_control() {
                    self.name_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            self.controller.logout(session);
        }
        self.guess_input.clear();
        self.notice = None;
    }

    fn report<T>(&mut self, result: Result<T, GameError>) {
        match result {
            Ok(_) => self.notice = None,
            Err(err) => self.report_error(err),
        }
    }

    fn report_error(&mut self, err: GameError) {
        error!(error = %err, "action failed");
        self.notice = Some(Notice::Error(err.to_string()));
    }

    fn handle_admin_input(&mut self, key: KeyEvent) {
        if self.admin.session.is_none() {
            self.handle_credentials_input(key);
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if let Some(admin) = self.admin.session.take() {
                    self.controller.admin_logout(admin);
                }
                self.admin = AdminPanel::new();
            }
            KeyCode::Right => self.cycle_admin_tab(1),
            KeyCode::Left => self.cycle_admin_tab(AdminTab::all().len() - 1),
            KeyCode::PageDown => self.cycle_category(1),
            KeyCode::PageUp => {
                let count = self.controller.word_bank().category_count().max(1);
                self.cycle_category(count - 1);
            }
            KeyCode::Down if self.admin.tab == AdminTab::Remove => {
                let count = self.selected_words().len();
                if count > 0 {
                    self.admin.word_idx = (self.admin.word_idx + 1) % count;
                }
            }
            KeyCode::Up if self.admin.tab == AdminTab::Remove => {
                let count = self.selected_words().len();
                if count > 0 {
                    self.admin.word_idx = (self.admin.word_idx + count - 1) % count;
                }
            }
            KeyCode::Enter => match self.admin.tab {
                AdminTab::Add => self.add_word(),
                AdminTab::Remove => self.remove_word(),
                AdminTab::View => {}
            },
            KeyCode::Backspace if self.admin.tab == AdminTab::Add => {
                self.admin.word_input.pop();
            }
            KeyCode::Char(c) if self.admin.tab == AdminTab::Add => {
                if self.admin.word_input.chars().count() < MAX_WORD_LEN && !c.is_control() {
                    self.admin.word_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_credentials_input(&mut self, key: KeyEvent) {
        let field = match self.admin.focus {
            CredentialField::Username => &mut self.admin.username,
            CredentialField::Password => &mut self.admin.password,
        };
        match key.code {
            KeyCode::Up | KeyCode::Down => {
                self.admin.focus = match self.admin.focus {
                    CredentialField::Username => CredentialField::Password,
                    CredentialField::Password => CredentialField::Username,
                };
            }
            KeyCode::Backspace => {
                field.pop();
            }
            KeyCode::Char(c) => {
                if field.chars().count() < MAX_CREDENTIAL_LEN && !c.is_control() {
                    field.push(c);
                }
            }
            KeyCode::Enter => {
                match self
                    .controller
                    .admin_login(&self.admin.username, &self.admin.password)
                {
                    Ok(admin) => {
                        self.admin.session = Some(admin);
                        self.admin.notice = Some(Notice::Success("Login successful!".to_string()));
                    }
                    Err(err) => self.admin.notice = Some(Notice::Error(err.to_string())),
                }
                self.admin.password.clear();
            }
            _ => {}
        }
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.controller
            .word_bank()
            .categories()
            .nth(self.admin.category_idx)
    }

    pub fn selected_words(&self) -> &[String] {
        self.selected_category()
            .and_then(|category| self.controller.word_bank().words(category))
            .unwrap_or(&[])
    }

    fn add_word(&mut self) {
        let (Some(admin), Some(category)) = (
            self.admin.session.as_ref(),
            self.selected_category().map(str::to_string),
        ) else {
            return;
        };
        let notice = match self
            .controller
            .add_word(admin, &category, &self.admin.word_input)
        {
            Ok(word) => {
                self.admin.word_input.clear();
                Notice::Success(format!("Word '{word}' added to {category}!"))
            }
            Err(GameError::WordBank(quizguess::WordBankError::Validation(reason))) => {
                Notice::Warning(reason)
            }
            Err(err) => {
                error!(error = %err, "failed to add word");
                Notice::Error(err.to_string())
            }
        };
        self.admin.notice = Some(notice);
    }

    fn remove_word(&mut self) {
        let Some(category) = self.selected_category().map(str::to_string) else {
            return;
        };
        let Some(word) = self.selected_words().get(self.admin.word_idx).cloned() else {
            return;
        };
        let Some(admin) = self.admin.session.as_ref() else {
            return;
        };
        let notice = match self.controller.remove_word(admin, &category, &word) {
            Ok(()) => Notice::Success(format!("Word '{word}' removed!")),
            Err(err) => {
                error!(error = %err, "failed to remove word");
                Notice::Error(err.to_string())
            }
        };
        self.admin.notice = Some(notice);
        let count = self.selected_words().len();
        if self.admin.word_idx >= count {
            self.admin.word_idx = count.saturating_sub(1);
        }
    }

    fn cycle_admin_tab(&mut self, step: usize) {
        let tabs = AdminTab::all();
        let idx = self.admin.tab.index();
        self.admin.tab = tabs[(idx + step) % tabs.len()];
        self.admin.notice = None;
    }

    fn cycle_category(&mut self, step: usize) {
        let count = self.controller.word_bank().category_count();
        if count == 0 {
            return;
        }
        self.admin.category_idx = (self.admin.category_idx + step) % count;
        self.admin.word_idx = 0;
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.current_tab = tabs[(idx + 1) % tabs.len()];
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.current_tab = tabs[(idx + tabs.len() - 1) % tabs.len()];
    }
}
