use crate::error::PanelError;

pub const STRING_COUNT: u8 = 6;
pub const MAX_FRET: u8 = 24;

/// Practice result attached to a note group. Set by the host after an attempt;
/// the panel only displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoteState {
    #[default]
    None,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    string: u8,
    fret: u8,
    duration_ms: u32,
    pub state: NoteState,
}

impl Note {
    pub fn new(string: u8, fret: u8, duration_ms: u32) -> Result<Self, PanelError> {
        check_string(string)?;
        if fret > MAX_FRET {
            return Err(PanelError::FretOutOfRange(fret));
        }
        if duration_ms == 0 {
            return Err(PanelError::ZeroDuration);
        }
        Ok(Self {
            string,
            fret,
            duration_ms,
            state: NoteState::None,
        })
    }

    pub fn string(&self) -> u8 {
        self.string
    }

    pub fn fret(&self) -> u8 {
        self.fret
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Zero-based lane, top lane first.
    pub fn lane(&self) -> usize {
        (self.string - 1) as usize
    }
}

/// Notes sharing one slot on the timeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoteGroup {
    notes: Vec<Note>,
}

impl NoteGroup {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Timeline advance of the group: the longest note decides.
    pub fn width(&self) -> u32 {
        self.notes
            .iter()
            .map(Note::duration_ms)
            .max()
            .unwrap_or(0)
    }

    /// The group is colored after its first note.
    pub fn state(&self) -> NoteState {
        self.notes.first().map(|note| note.state).unwrap_or_default()
    }

    pub fn set_state(&mut self, state: NoteState) {
        if let Some(first) = self.notes.first_mut() {
            first.state = state;
        }
    }
}

/// Ordered note groups, left to right in playback order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tablature {
    groups: Vec<NoteGroup>,
}

impl Tablature {
    pub fn new(groups: Vec<NoteGroup>) -> Self {
        Self { groups }
    }

    pub fn set_data(&mut self, groups: Vec<NoteGroup>) {
        self.groups = groups;
    }

    pub fn groups(&self) -> &[NoteGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum of every group's width in milliseconds. Recomputed on each call.
    pub fn total_duration(&self) -> u64 {
        self.groups.iter().map(|group| group.width() as u64).sum()
    }

    /// Start time of each group, paired with the group.
    pub fn timed_groups(&self) -> impl Iterator<Item = (u64, &NoteGroup)> {
        self.groups.iter().scan(0u64, |cursor, group| {
            let start = *cursor;
            *cursor += group.width() as u64;
            Some((start, group))
        })
    }

    /// Index of the group playing at `time_ms`.
    pub fn group_at(&self, time_ms: u64) -> Option<usize> {
        self.timed_groups()
            .position(|(start, group)| time_ms >= start && time_ms < start + group.width() as u64)
    }

    pub fn update_group_state(&mut self, index: usize, state: NoteState) -> Result<(), PanelError> {
        let len = self.groups.len();
        let group = self
            .groups
            .get_mut(index)
            .ok_or(PanelError::GroupIndexOutOfRange { index, len })?;
        group.set_state(state);
        Ok(())
    }

    pub fn reset_states(&mut self) {
        for group in &mut self.groups {
            for note in &mut group.notes {
                note.state = NoteState::None;
            }
        }
    }
}

pub(crate) fn check_string(string: u8) -> Result<(), PanelError> {
    if (1..=STRING_COUNT).contains(&string) {
        Ok(())
    } else {
        Err(PanelError::StringOutOfRange(string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(string: u8, fret: u8, duration_ms: u32) -> Note {
        Note::new(string, fret, duration_ms).unwrap()
    }

    fn riff() -> Tablature {
        Tablature::new(vec![
            NoteGroup::new(vec![note(1, 3, 500), note(2, 5, 400)]),
            NoteGroup::new(vec![note(5, 7, 300), note(6, 2, 300)]),
            NoteGroup::new(vec![note(3, 0, 250)]),
        ])
    }

    #[test]
    fn total_duration_sums_longest_note_per_group() {
        assert_eq!(riff().total_duration(), 500 + 300 + 250);
    }

    #[test]
    fn empty_tablature_has_no_duration() {
        let tab = Tablature::default();
        assert!(tab.is_empty());
        assert_eq!(tab.total_duration(), 0);
        assert_eq!(tab.timed_groups().count(), 0);
    }

    #[test]
    fn timed_groups_are_contiguous() {
        let tab = riff();
        let starts: Vec<u64> = tab.timed_groups().map(|(start, _)| start).collect();
        assert_eq!(starts, vec![0, 500, 800]);
    }

    #[test]
    fn group_at_finds_the_playing_group() {
        let tab = riff();
        assert_eq!(tab.group_at(0), Some(0));
        assert_eq!(tab.group_at(499), Some(0));
        assert_eq!(tab.group_at(500), Some(1));
        assert_eq!(tab.group_at(1049), Some(2));
        assert_eq!(tab.group_at(1050), None);
    }

    #[test]
    fn updating_state_touches_one_group_and_keeps_duration() {
        let mut tab = riff();
        let before = tab.total_duration();
        tab.update_group_state(1, NoteState::Wrong).unwrap();

        assert_eq!(tab.groups()[0].state(), NoteState::None);
        assert_eq!(tab.groups()[1].state(), NoteState::Wrong);
        assert_eq!(tab.groups()[2].state(), NoteState::None);
        assert_eq!(tab.total_duration(), before);
    }

    #[test]
    fn out_of_range_group_index_is_an_error() {
        let mut tab = riff();
        let err = tab.update_group_state(3, NoteState::Correct).unwrap_err();
        assert_eq!(err, PanelError::GroupIndexOutOfRange { index: 3, len: 3 });
    }

    #[test]
    fn reset_clears_states_but_keeps_notes() {
        let mut tab = riff();
        tab.update_group_state(0, NoteState::Correct).unwrap();
        tab.update_group_state(2, NoteState::Wrong).unwrap();
        tab.reset_states();

        assert!(tab.groups().iter().all(|g| g.state() == NoteState::None));
        assert_eq!(tab, riff());
    }

    #[test]
    fn note_validation() {
        assert_eq!(Note::new(0, 1, 100), Err(PanelError::StringOutOfRange(0)));
        assert_eq!(Note::new(7, 1, 100), Err(PanelError::StringOutOfRange(7)));
        assert_eq!(Note::new(1, 25, 100), Err(PanelError::FretOutOfRange(25)));
        assert_eq!(Note::new(1, 1, 0), Err(PanelError::ZeroDuration));
    }

    #[test]
    fn empty_group_is_neutral() {
        let mut group = NoteGroup::default();
        group.set_state(NoteState::Correct);
        assert_eq!(group.width(), 0);
        assert_eq!(group.state(), NoteState::None);
    }
}
