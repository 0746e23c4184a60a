//! Exchange creation wizard
//!
//! Four linear steps:
//!
//! 1. pick the books you want
//! 2. pick one user who owns them
//! 3. pick books from your own library to offer
//! 4. confirm
//!
//! "Next" is available only when the current step has a selection. Going
//! back keeps everything that was selected; closing the wizard throws it all
//! away.

use shared::models::{BookPreview, CreateExchangeRequest, UserBook, UserPreview};
use thiserror::Error;

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    SelectBooks,
    SelectOwner,
    SelectOffer,
    Confirm,
}

impl WizardStep {
    /// 1-based position, as shown in the step indicator
    pub fn number(&self) -> u8 {
        match self {
            Self::SelectBooks => 1,
            Self::SelectOwner => 2,
            Self::SelectOffer => 3,
            Self::Confirm => 4,
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            Self::SelectBooks => Some(Self::SelectOwner),
            Self::SelectOwner => Some(Self::SelectOffer),
            Self::SelectOffer => Some(Self::Confirm),
            Self::Confirm => None,
        }
    }

    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            Self::SelectBooks => None,
            Self::SelectOwner => Some(Self::SelectBooks),
            Self::SelectOffer => Some(Self::SelectOwner),
            Self::Confirm => Some(Self::SelectOffer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Nothing selected on step {}", .0.number())]
    SelectionRequired(WizardStep),

    #[error("Already on the last step")]
    NoNextStep,

    #[error("Cannot exchange books with yourself")]
    SelfSelected,

    #[error("Book {0} is not in your library")]
    NotOwnBook(String),

    #[error("The offer can only be submitted from the confirmation step")]
    NotConfirmed,
}

/// Exchange creation wizard state
#[derive(Debug, Clone)]
pub struct ExchangeWizard {
    current_user_id: String,
    step: WizardStep,
    desired_books: Vec<BookPreview>,
    owner: Option<UserPreview>,
    offered_books: Vec<UserBook>,
}

impl ExchangeWizard {
    pub fn new(current_user_id: impl Into<String>) -> Self {
        Self {
            current_user_id: current_user_id.into(),
            step: WizardStep::SelectBooks,
            desired_books: Vec::new(),
            owner: None,
            offered_books: Vec::new(),
        }
    }

    /// Open the wizard from scratch
    ///
    /// With both a book and its owner preselected (e.g. from a book page),
    /// steps 1 and 2 are already answered and the wizard starts at step 3.
    pub fn open(&mut self, book: Option<BookPreview>, owner: Option<UserPreview>) {
        self.reset();
        if let (Some(book), Some(owner)) = (book, owner)
            && owner.id != self.current_user_id
        {
            self.desired_books.push(book);
            self.owner = Some(owner);
            self.step = WizardStep::SelectOffer;
        }
    }

    /// Close the wizard, discarding all selections
    pub fn close(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.step = WizardStep::SelectBooks;
        self.desired_books.clear();
        self.owner = None;
        self.offered_books.clear();
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Whether the current step has what it needs for "Next"
    pub fn can_advance(&self) -> bool {
        match self.step {
            WizardStep::SelectBooks => !self.desired_books.is_empty(),
            WizardStep::SelectOwner => self.owner.is_some(),
            WizardStep::SelectOffer => !self.offered_books.is_empty(),
            WizardStep::Confirm => false,
        }
    }

    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        let next = self.step.next().ok_or(WizardError::NoNextStep)?;
        if !self.can_advance() {
            return Err(WizardError::SelectionRequired(self.step));
        }
        self.step = next;
        Ok(next)
    }

    /// Step back, keeping selections. No-op on the first step.
    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    // ========== Step 1 ==========

    /// Select or unselect a wanted book; returns whether it is now selected
    pub fn toggle_desired_book(&mut self, book: BookPreview) -> bool {
        if let Some(pos) = self.desired_books.iter().position(|b| b.id == book.id) {
            self.desired_books.remove(pos);
            false
        } else {
            self.desired_books.push(book);
            true
        }
    }

    pub fn is_desired(&self, book_id: &str) -> bool {
        self.desired_books.iter().any(|b| b.id == book_id)
    }

    pub fn desired_books(&self) -> &[BookPreview] {
        &self.desired_books
    }

    pub fn desired_book_ids(&self) -> Vec<String> {
        self.desired_books.iter().map(|b| b.id.clone()).collect()
    }

    // ========== Step 2 ==========

    /// Pick the user to exchange with, replacing any previous pick
    pub fn select_owner(&mut self, owner: UserPreview) -> Result<(), WizardError> {
        if owner.id == self.current_user_id {
            return Err(WizardError::SelfSelected);
        }
        self.owner = Some(owner);
        Ok(())
    }

    pub fn owner(&self) -> Option<&UserPreview> {
        self.owner.as_ref()
    }

    // ========== Step 3 ==========

    /// Select or unselect one of the current user's library entries
    pub fn toggle_offered_book(&mut self, entry: UserBook) -> Result<bool, WizardError> {
        if entry.user_id != self.current_user_id {
            return Err(WizardError::NotOwnBook(entry.book_id));
        }
        if let Some(pos) = self.offered_books.iter().position(|b| b.id == entry.id) {
            self.offered_books.remove(pos);
            Ok(false)
        } else {
            self.offered_books.push(entry);
            Ok(true)
        }
    }

    pub fn offered_books(&self) -> &[UserBook] {
        &self.offered_books
    }

    // ========== Step 4 ==========

    /// Assemble the create payload from the confirmation step
    pub fn build_request(&self) -> Result<CreateExchangeRequest, WizardError> {
        if self.step != WizardStep::Confirm {
            return Err(WizardError::NotConfirmed);
        }
        if self.desired_books.is_empty() {
            return Err(WizardError::SelectionRequired(WizardStep::SelectBooks));
        }
        let owner = self
            .owner
            .as_ref()
            .ok_or(WizardError::SelectionRequired(WizardStep::SelectOwner))?;
        if self.offered_books.is_empty() {
            return Err(WizardError::SelectionRequired(WizardStep::SelectOffer));
        }

        let mut requester_book_ids: Vec<String> = Vec::with_capacity(self.offered_books.len());
        for entry in &self.offered_books {
            if !requester_book_ids.contains(&entry.book_id) {
                requester_book_ids.push(entry.book_id.clone());
            }
        }

        Ok(CreateExchangeRequest {
            owner_id: owner.id.clone(),
            requester_id: self.current_user_id.clone(),
            owner_book_ids: self.desired_book_ids(),
            requester_book_ids,
        })
    }
}
