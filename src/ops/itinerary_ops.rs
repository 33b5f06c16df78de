//! Edit operations on the itinerary tree.
//!
//! Every function checks all of its preconditions before touching the
//! tree, so an `Err` always leaves the itinerary exactly as it was.

use crate::model::itinerary::{Category, Day, Item, Itinerary};

/// Why an edit was not applied
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("empty input")]
    EmptyInput,
    #[error("day index out of range: {0}")]
    DayOutOfRange(usize),
    #[error("category index out of range: {day}/{category}")]
    CategoryOutOfRange { day: usize, category: usize },
    #[error("item index out of range: {day}/{category}/{item}")]
    ItemOutOfRange {
        day: usize,
        category: usize,
        item: usize,
    },
}

impl EditError {
    /// True for a cancelled or blank prompt, as opposed to a stale index
    pub fn is_empty_input(&self) -> bool {
        matches!(self, EditError::EmptyInput)
    }
}

/// Reject empty input. Whitespace is text like any other.
fn require_text(text: &str) -> Result<(), EditError> {
    if text.is_empty() {
        Err(EditError::EmptyInput)
    } else {
        Ok(())
    }
}

fn day_mut(it: &mut Itinerary, day: usize) -> Result<&mut Day, EditError> {
    it.days.get_mut(day).ok_or(EditError::DayOutOfRange(day))
}

fn category_mut(
    it: &mut Itinerary,
    day: usize,
    category: usize,
) -> Result<&mut Category, EditError> {
    day_mut(it, day)?
        .categories
        .get_mut(category)
        .ok_or(EditError::CategoryOutOfRange { day, category })
}

fn item_mut(
    it: &mut Itinerary,
    day: usize,
    category: usize,
    item: usize,
) -> Result<&mut Item, EditError> {
    category_mut(it, day, category)?
        .items
        .get_mut(item)
        .ok_or(EditError::ItemOutOfRange {
            day,
            category,
            item,
        })
}

pub fn rename_trip(it: &mut Itinerary, title: &str) -> Result<(), EditError> {
    require_text(title)?;
    it.title = title.to_string();
    Ok(())
}

/// Append a new day titled after the current day count.
/// Returns the index of the new day.
pub fn add_day(it: &mut Itinerary) -> usize {
    let title = format!("Day {}", it.days.len() + 1);
    it.days.push(Day::new(title, &it.category_names));
    it.days.len() - 1
}

pub fn toggle_day(it: &mut Itinerary, day: usize) -> Result<(), EditError> {
    let d = day_mut(it, day)?;
    d.is_expanded = !d.is_expanded;
    Ok(())
}

pub fn rename_day(it: &mut Itinerary, day: usize, title: &str) -> Result<(), EditError> {
    require_text(title)?;
    day_mut(it, day)?.title = title.to_string();
    Ok(())
}

/// Remove the day at `day`. Remaining days keep their titles.
pub fn delete_day(it: &mut Itinerary, day: usize) -> Result<Day, EditError> {
    if day >= it.days.len() {
        return Err(EditError::DayOutOfRange(day));
    }
    Ok(it.days.remove(day))
}

pub fn toggle_category(it: &mut Itinerary, day: usize, category: usize) -> Result<(), EditError> {
    let c = category_mut(it, day, category)?;
    c.is_expanded = !c.is_expanded;
    Ok(())
}

/// Append an item to a category. Returns the index of the new item.
pub fn add_item(
    it: &mut Itinerary,
    day: usize,
    category: usize,
    text: &str,
) -> Result<usize, EditError> {
    require_text(text)?;
    let c = category_mut(it, day, category)?;
    c.items.push(Item::new(text.to_string()));
    Ok(c.items.len() - 1)
}

/// Overwrite an item's map link
pub fn set_item_link(
    it: &mut Itinerary,
    day: usize,
    category: usize,
    item: usize,
    link: &str,
) -> Result<(), EditError> {
    require_text(link)?;
    item_mut(it, day, category, item)?.link = link.to_string();
    Ok(())
}
