use std::collections::VecDeque;

use crate::{
    Side,
    types::token::{Mark, Token},
};

/// A mark placed in the fused output, remembering which document it came
/// from so element ids of the two documents never get mixed up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    pub side: Side,
    pub mark: Mark,
}

impl Boundary {
    pub fn new(side: Side, mark: Mark) -> Self { Self { side, mark } }
}

/// Boundaries of one document's token still waiting to be matched.
#[derive(Debug, Clone, Default)]
pub struct Pending {
    pub prefix: VecDeque<Mark>,
    pub suffix: VecDeque<Mark>,
}

impl Pending {
    fn from_token(token: Token) -> (Self, String) {
        (
            Self {
                prefix: token.prefix.into(),
                suffix: token.suffix.into(),
            },
            token.text,
        )
    }

    pub fn is_empty(&self) -> bool { self.prefix.is_empty() && self.suffix.is_empty() }
}

/// One text run shared by both documents, with the markup of each still to
/// be placed and the placed output around it.
#[derive(Debug, Clone)]
pub struct SyncRow {
    pub master: Pending,
    pub slave: Pending,
    pub text: String,
    pub prefix: VecDeque<Boundary>,
    pub suffix: Vec<Boundary>,
}

impl SyncRow {
    /// # Panics
    ///
    /// Panics if the two tokens don't share the same text.
    pub fn new(master: Token, slave: Token) -> Self {
        assert_eq!(
            master.text, slave.text,
            "internal fault: aligned tokens must have identical text"
        );

        let (master, text) = Pending::from_token(master);
        let (slave, _) = Pending::from_token(slave);

        Self {
            master,
            slave,
            text,
            prefix: VecDeque::new(),
            suffix: Vec::new(),
        }
    }

    pub fn pending(&self, side: Side) -> &Pending {
        match side {
            Side::Master => &self.master,
            Side::Slave => &self.slave,
        }
    }

    /// Borrow one document's pending marks together with the output.
    pub fn split(
        &mut self,
        side: Side,
    ) -> (&mut Pending, &mut VecDeque<Boundary>, &mut Vec<Boundary>) {
        let pending = match side {
            Side::Master => &mut self.master,
            Side::Slave => &mut self.slave,
        };

        (pending, &mut self.prefix, &mut self.suffix)
    }

    /// All closing tags after this row have found their opening tag.
    pub fn is_settled(&self) -> bool { self.master.suffix.is_empty() && self.slave.suffix.is_empty() }

    /// Some opening tag before this row is still waiting for its close.
    pub fn has_pending_prefix(&self) -> bool {
        !self.master.prefix.is_empty() || !self.slave.prefix.is_empty()
    }
}
