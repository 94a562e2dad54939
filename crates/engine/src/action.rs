//! Draft actions and their fixed 180-entry index space.
//!
//! `index = display * 30 + color * 6 + slot`, where display 0..=4 are the
//! factories, 5 is the central display, and slot 5 is the floor line.

use crate::{Color, BOARD_SIZE, FLOOR_SLOT, NUM_FACTORIES, TILE_COLORS};

/// Discrete action identifier (0..ACTION_SPACE_SIZE)
pub type ActionId = usize;

/// Displays in the codec: 5 factories + the central display
pub const NUM_DISPLAYS: usize = NUM_FACTORIES + 1;

/// Destination slots in the codec: 5 pattern lines + the floor
pub const LINE_SLOTS: usize = BOARD_SIZE + 1;

pub const ACTION_SPACE_SIZE: usize = NUM_DISPLAYS * TILE_COLORS * LINE_SLOTS;

/// Mask over the action space: mask[id] == true if that action is legal
pub type ActionMask = [bool; ACTION_SPACE_SIZE];

/// Source of tiles for drafting
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DraftSource {
    Factory(u8), // 0..NUM_FACTORIES
    Center,
}

impl DraftSource {
    /// Signed display index: factories are 0..=4, the center is -1.
    pub fn display_index(self) -> i8 {
        match self {
            DraftSource::Factory(f) => f as i8,
            DraftSource::Center => -1,
        }
    }

    pub fn from_display_index(idx: i8) -> Option<DraftSource> {
        match idx {
            -1 => Some(DraftSource::Center),
            0..=4 => Some(DraftSource::Factory(idx as u8)),
            _ => None,
        }
    }

    fn codec_index(self) -> usize {
        match self {
            DraftSource::Factory(f) => f as usize,
            DraftSource::Center => NUM_FACTORIES,
        }
    }
}

/// Destination for drafted tiles
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DraftDestination {
    PatternLine(u8), // 0..=4
    Floor,
}

impl DraftDestination {
    /// Line slot as the board sees it; the floor is FLOOR_SLOT.
    pub fn line_slot(self) -> usize {
        match self {
            DraftDestination::PatternLine(r) => r as usize,
            DraftDestination::Floor => FLOOR_SLOT,
        }
    }

    pub fn from_line_slot(slot: usize) -> DraftDestination {
        if slot < BOARD_SIZE {
            DraftDestination::PatternLine(slot as u8)
        } else {
            DraftDestination::Floor
        }
    }
}

/// A player action: draft tiles of a color from a source to a destination
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Action {
    pub source: DraftSource,
    pub color: Color,
    pub dest: DraftDestination,
}

impl Action {
    pub fn new(source: DraftSource, color: Color, dest: DraftDestination) -> Self {
        Action {
            source,
            color,
            dest,
        }
    }

    pub fn to_index(self) -> ActionId {
        action_to_index(self)
    }
}

/// Encode an action into its index.
pub fn action_to_index(action: Action) -> ActionId {
    let id = (action.source.codec_index() * TILE_COLORS + action.color.index()) * LINE_SLOTS
        + action.dest.line_slot();
    debug_assert!(id < ACTION_SPACE_SIZE, "ActionId {id} out of range");
    id
}

/// Decode an index back into an action.
///
/// The result is syntactically valid but not necessarily legal; check it
/// against `valid_action_mask`. Returns None for ids past the action space.
pub fn index_to_action(id: ActionId) -> Option<Action> {
    if id >= ACTION_SPACE_SIZE {
        return None;
    }
    let slot = id % LINE_SLOTS;
    let color_idx = (id / LINE_SLOTS) % TILE_COLORS;
    let display = id / (LINE_SLOTS * TILE_COLORS);

    let source = if display == NUM_FACTORIES {
        DraftSource::Center
    } else {
        DraftSource::Factory(display as u8)
    };
    let color = Color::from_index(color_idx as u8)?;

    Some(Action {
        source,
        color,
        dest: DraftDestination::from_line_slot(slot),
    })
}

/// Iterate the ids set in a mask.
pub fn legal_ids(mask: &ActionMask) -> impl Iterator<Item = ActionId> + '_ {
    mask.iter()
        .enumerate()
        .filter(|(_, &legal)| legal)
        .map(|(id, _)| id)
}
