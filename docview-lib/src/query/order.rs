//! Sort state for document queries.

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Marker written in front of the field name in a sort token.
    pub const DESC_MARKER: char = '-';

    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Prefix used when encoding this direction into a sort token.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Asc => "",
            Self::Desc => "-",
        }
    }
}

/// The field the list is sorted by, and in which direction.
///
/// An empty field means "storage default order"; the direction is then
/// carried along but has no effect on the encoded token.
///
/// # Example
///
/// ```
/// use docview_lib::query::{Direction, SortState};
///
/// let mut sort = SortState::default();
/// sort.toggle("date");
/// assert_eq!(sort.token(), "date");
///
/// sort.toggle("date");
/// assert_eq!(sort.direction(), Some(Direction::Desc));
/// assert_eq!(sort.token(), "-date");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    field: String,
    direction: Direction,
}

impl SortState {
    /// Creates an ascending sort on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }

    /// Parses a sort token such as `"-date"` or `"title"`.
    pub fn from_token(token: &str) -> Self {
        match token.strip_prefix(Direction::DESC_MARKER) {
            Some(field) => Self::desc(field),
            None => Self::asc(token),
        }
    }

    /// The sorted field, or `None` when no field is chosen.
    pub fn field(&self) -> Option<&str> {
        if self.field.is_empty() {
            None
        } else {
            Some(&self.field)
        }
    }

    /// The direction, or `None` when no field is chosen.
    pub fn direction(&self) -> Option<Direction> {
        self.field().map(|_| self.direction)
    }

    /// Applies a click on a sortable column.
    ///
    /// Clicking the current field flips the direction. Clicking any other
    /// field switches to it in ascending order.
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            self.field = field.to_string();
            self.direction = Direction::Asc;
        }
    }

    /// Encodes the state as a sort token.
    ///
    /// Empty when no field is chosen, otherwise the field name with `-` in
    /// front for descending order.
    pub fn token(&self) -> String {
        if self.field.is_empty() {
            String::new()
        } else {
            format!("{}{}", self.direction.prefix(), self.field)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_same_field_flips_direction() {
        let mut sort = SortState::default();
        sort.toggle("date");
        assert_eq!(sort.direction(), Some(Direction::Asc));

        sort.toggle("date");
        assert_eq!(sort.direction(), Some(Direction::Desc));

        sort.toggle("date");
        assert_eq!(sort.direction(), Some(Direction::Asc));
    }

    #[test]
    fn test_toggle_other_field_resets_direction() {
        let mut sort = SortState::desc("date");
        sort.toggle("title");
        assert_eq!(sort.field(), Some("title"));
        assert_eq!(sort.direction(), Some(Direction::Asc));
    }

    #[test]
    fn test_token_encoding() {
        assert_eq!(SortState::default().token(), "");
        assert_eq!(SortState::asc("title").token(), "title");
        assert_eq!(SortState::desc("title").token(), "-title");
    }

    #[test]
    fn test_direction_meaningless_without_field() {
        let sort = SortState::desc("");
        assert_eq!(sort.field(), None);
        assert_eq!(sort.direction(), None);
        assert_eq!(sort.token(), "");
    }

    #[test]
    fn test_from_token() {
        assert_eq!(SortState::from_token("-date"), SortState::desc("date"));
        assert_eq!(SortState::from_token("date"), SortState::asc("date"));
        assert_eq!(SortState::from_token(""), SortState::default());
    }
}
