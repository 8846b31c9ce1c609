//! Focus identifiers and the modal focus trap.

/// Every focusable control on the contact screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Name,
    Email,
    Message,
    Send,
    CopyEmail,
    ClearDraft,
    ThanksCopyEmail,
    ThanksClose,
}

impl Control {
    /// The form field behind this control, if it is an input.
    pub fn field(self) -> Option<super::Field> {
        use super::Field;
        match self {
            Self::Name => Some(Field::Name),
            Self::Email => Some(Field::Email),
            Self::Message => Some(Field::Message),
            _ => None,
        }
    }
}

/// Confines keyboard focus to a fixed set of members.
///
/// Engaging remembers the element that had focus before; releasing hands it
/// back so the caller can restore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTrap<T> {
    previous: T,
    members: Vec<T>,
    current: usize,
}

impl<T: Copy + PartialEq> FocusTrap<T> {
    /// Engages a trap over `members`.
    ///
    /// Focus lands on `preferred` when it is a member, otherwise on the first
    /// member. Returns `None` if `members` is empty.
    pub fn engage(previous: T, members: Vec<T>, preferred: Option<T>) -> Option<Self> {
        if members.is_empty() {
            return None;
        }
        let current = preferred
            .and_then(|p| members.iter().position(|m| *m == p))
            .unwrap_or(0);
        Some(Self {
            previous,
            members,
            current,
        })
    }

    /// The focused member.
    pub fn current(&self) -> T {
        self.members[self.current]
    }

    /// Tab: moves to the next member, wrapping from the last to the first.
    pub fn next(&mut self) -> T {
        self.current = (self.current + 1) % self.members.len();
        self.current()
    }

    /// Shift+Tab: moves to the previous member, wrapping from the first to the last.
    pub fn prev(&mut self) -> T {
        self.current = (self.current + self.members.len() - 1) % self.members.len();
        self.current()
    }

    /// Moves focus to `target` if it is a member; returns whether it moved.
    pub fn focus(&mut self, target: T) -> bool {
        match self.members.iter().position(|m| *m == target) {
            Some(index) => {
                self.current = index;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, target: T) -> bool {
        self.members.contains(&target)
    }

    /// Disengages the trap, returning the element focused before it engaged.
    pub fn release(self) -> T {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modal_trap() -> FocusTrap<Control> {
        FocusTrap::engage(
            Control::Send,
            vec![Control::ThanksCopyEmail, Control::ThanksClose],
            Some(Control::ThanksClose),
        )
        .unwrap()
    }

    #[test]
    fn engage_prefers_explicit_close_control() {
        assert_eq!(modal_trap().current(), Control::ThanksClose);
    }

    #[test]
    fn engage_without_preference_focuses_first() {
        let trap = FocusTrap::engage(0, vec![1, 2, 3], None).unwrap();
        assert_eq!(trap.current(), 1);
    }

    #[test]
    fn engage_with_foreign_preference_focuses_first() {
        let trap = FocusTrap::engage(0, vec![1, 2, 3], Some(9)).unwrap();
        assert_eq!(trap.current(), 1);
    }

    #[test]
    fn engage_empty_is_none() {
        assert!(FocusTrap::<u8>::engage(0, vec![], None).is_none());
    }

    #[test]
    fn tab_on_last_wraps_to_first() {
        let mut trap = modal_trap();
        assert_eq!(trap.next(), Control::ThanksCopyEmail);
    }

    #[test]
    fn shift_tab_on_first_wraps_to_last() {
        let mut trap = FocusTrap::engage(0, vec![1, 2, 3], None).unwrap();
        assert_eq!(trap.prev(), 3);
        assert_eq!(trap.prev(), 2);
    }

    #[test]
    fn focus_never_leaves_members() {
        let mut trap = FocusTrap::engage(0, vec![1, 2, 3], None).unwrap();
        for _ in 0..10 {
            let current = trap.next();
            assert!(trap.contains(current));
        }
        for _ in 0..10 {
            let current = trap.prev();
            assert!(trap.contains(current));
        }
    }

    #[test]
    fn focus_rejects_non_members() {
        let mut trap = modal_trap();
        assert!(!trap.focus(Control::Name));
        assert_eq!(trap.current(), Control::ThanksClose);
        assert!(trap.focus(Control::ThanksCopyEmail));
        assert_eq!(trap.current(), Control::ThanksCopyEmail);
    }

    #[test]
    fn release_returns_previous_focus() {
        let mut trap = modal_trap();
        trap.next();
        assert_eq!(trap.release(), Control::Send);
    }

    #[test]
    fn field_mapping() {
        assert_eq!(Control::Name.field(), Some(super::super::Field::Name));
        assert_eq!(Control::Send.field(), None);
        assert_eq!(Control::ThanksClose.field(), None);
    }
}
