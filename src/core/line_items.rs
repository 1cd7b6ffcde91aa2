//! Line item business logic - creating, editing and removing work items.
//!
//! Catalog-sourced items keep their code, description, unit and price locked to
//! the catalog: only their quantity changes, and they are swapped by re-selecting
//! a catalog entry rather than deleted. Manual items are free-form but validated
//! before any change is committed; a failed validation leaves the project as it was.

use crate::{
    core::derivation::DerivedQuantityUpdate,
    entities::CatalogEntryModel,
    errors::{Error, Result},
    models::{ItemSource, ItemTag, LineItem, Project, WorkList, numeric::non_negative},
};
use tracing::debug;
use uuid::Uuid;

/// User-supplied fields of a manual line item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ManualItemDraft {
    /// Category the item is grouped under
    pub category: String,
    /// Item code; must be unique within its list
    pub code: String,
    /// Free-text description
    pub description: String,
    /// Unit symbol
    pub unit: String,
    /// Unit price in lira; must be positive
    pub unit_price: f64,
}

/// How derived quantities are written into matching items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// Add the derived quantity to the item's current quantity.
    #[default]
    Accumulate,
    /// Overwrite the item's quantity; applying twice gives the same result.
    Replace,
}

/// Outcome of a derived quantity merge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergeReport {
    /// Codes written, with the list and item that received them
    pub applied: Vec<(String, WorkList, String)>,
    /// Codes with no matching item in the static or architectural list
    pub skipped: Vec<String>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Validates a manual draft: code, description and unit non-empty, price a
/// finite non-negative number.
///
/// # Errors
/// Returns `Error::Validation` naming the first empty field, or
/// `Error::InvalidAmount` for a bad price.
pub fn validate_manual_draft(draft: &ManualItemDraft) -> Result<()> {
    let required = [
        ("code", &draft.code),
        ("description", &draft.description),
        ("unit", &draft.unit),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(Error::Validation {
                field,
                message: format!("{field} cannot be empty"),
            });
        }
    }

    if !draft.unit_price.is_finite() || draft.unit_price < 0.0 {
        return Err(Error::InvalidAmount {
            amount: draft.unit_price,
        });
    }

    Ok(())
}

fn validate_quantity(quantity: f64) -> Result<()> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(Error::InvalidAmount { amount: quantity });
    }
    Ok(())
}

/// Builds a line item from a catalog entry.
#[must_use]
pub fn item_from_catalog(entry: &CatalogEntryModel, quantity: f64) -> LineItem {
    LineItem {
        id: new_id(),
        category: entry.category.clone(),
        code: entry.code.clone(),
        description: entry.description.clone(),
        unit: entry.unit.clone(),
        unit_price: entry.unit_price.max(0.0),
        quantity: non_negative(quantity),
        source: ItemSource::Catalog,
        tag: None,
        realized_quantity: None,
        subcontractor_id: None,
        mahal: None,
    }
}

/// Builds a validated manual line item.
pub fn manual_item(draft: &ManualItemDraft, quantity: f64) -> Result<LineItem> {
    validate_manual_draft(draft)?;
    validate_quantity(quantity)?;

    Ok(LineItem {
        id: new_id(),
        category: draft.category.trim().to_string(),
        code: draft.code.trim().to_string(),
        description: draft.description.trim().to_string(),
        unit: draft.unit.trim().to_string(),
        unit_price: draft.unit_price,
        quantity,
        source: ItemSource::Manual,
        tag: None,
        realized_quantity: None,
        subcontractor_id: None,
        mahal: None,
    })
}

/// Appends an item to a list and returns its id.
pub fn add_item(project: &mut Project, list: WorkList, item: LineItem) -> String {
    let id = item.id.clone();
    debug!("Adding {} item {} ({})", list, id, item.code);
    project.list_mut(list).push(item);
    id
}

/// Selects a catalog entry into a list.
pub fn add_from_catalog(
    project: &mut Project,
    list: WorkList,
    entry: &CatalogEntryModel,
    quantity: f64,
) -> String {
    add_item(project, list, item_from_catalog(entry, quantity))
}

/// Adds a manual item to a list after validation.
pub fn add_manual(
    project: &mut Project,
    list: WorkList,
    draft: &ManualItemDraft,
    quantity: f64,
) -> Result<String> {
    let item = manual_item(draft, quantity)?;
    Ok(add_item(project, list, item))
}

fn find_item_mut<'a>(project: &'a mut Project, id: &str) -> Result<&'a mut LineItem> {
    let list = project
        .find_item(id)
        .map(|(list, _)| list)
        .ok_or_else(|| Error::LineItemNotFound { id: id.to_string() })?;
    project
        .list_mut(list)
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or_else(|| Error::LineItemNotFound { id: id.to_string() })
}

/// Sets the contract quantity of any item.
pub fn update_quantity(project: &mut Project, id: &str, quantity: f64) -> Result<()> {
    validate_quantity(quantity)?;
    find_item_mut(project, id)?.quantity = quantity;
    Ok(())
}

/// Sets the measured (realized) quantity of any item.
pub fn update_realized_quantity(project: &mut Project, id: &str, quantity: f64) -> Result<()> {
    validate_quantity(quantity)?;
    find_item_mut(project, id)?.realized_quantity = Some(quantity);
    Ok(())
}

/// Rewrites code, description, unit, price and category of a manual item.
///
/// # Errors
/// `Error::NotEditable` for catalog items; validation errors leave the item untouched.
pub fn edit_manual_item(project: &mut Project, id: &str, draft: &ManualItemDraft) -> Result<()> {
    let item = find_item_mut(project, id)?;
    match item.source {
        ItemSource::Catalog => Err(Error::NotEditable { id: id.to_string() }),
        ItemSource::Manual => {
            validate_manual_draft(draft)?;
            item.category = draft.category.trim().to_string();
            item.code = draft.code.trim().to_string();
            item.description = draft.description.trim().to_string();
            item.unit = draft.unit.trim().to_string();
            item.unit_price = draft.unit_price;
            Ok(())
        }
    }
}

/// Swaps an item's priced fields for a catalog entry, keeping its id, quantities,
/// tag and assignments. A manual item replaced this way becomes a catalog item.
pub fn replace_from_catalog(
    project: &mut Project,
    id: &str,
    entry: &CatalogEntryModel,
) -> Result<()> {
    let item = find_item_mut(project, id)?;
    item.category = entry.category.clone();
    item.code = entry.code.clone();
    item.description = entry.description.clone();
    item.unit = entry.unit.clone();
    item.unit_price = entry.unit_price.max(0.0);
    item.source = ItemSource::Catalog;
    Ok(())
}

/// Removes a manual item and returns it.
///
/// # Errors
/// `Error::NotDeletable` for catalog items.
pub fn delete_item(project: &mut Project, id: &str) -> Result<LineItem> {
    let (list, source) = project
        .find_item(id)
        .map(|(list, item)| (list, item.source))
        .ok_or_else(|| Error::LineItemNotFound { id: id.to_string() })?;

    match source {
        ItemSource::Catalog => Err(Error::NotDeletable { id: id.to_string() }),
        ItemSource::Manual => {
            let items = project.list_mut(list);
            let index = items
                .iter()
                .position(|item| item.id == id)
                .ok_or_else(|| Error::LineItemNotFound { id: id.to_string() })?;
            Ok(items.remove(index))
        }
    }
}

/// Attaches or clears a label.
pub fn set_tag(project: &mut Project, id: &str, tag: Option<ItemTag>) -> Result<()> {
    find_item_mut(project, id)?.tag = tag;
    Ok(())
}

/// Assigns an item to a subcontractor, or back to the main contractor with `None`.
pub fn assign_subcontractor(
    project: &mut Project,
    id: &str,
    subcontractor_id: Option<String>,
) -> Result<()> {
    find_item_mut(project, id)?.subcontractor_id = subcontractor_id;
    Ok(())
}

/// Writes derived quantities into the first item carrying each code.
///
/// The static list is scanned before the architectural list. Codes with no
/// matching item are skipped; one missing code never stops the rest.
pub fn apply_derived_updates(
    project: &mut Project,
    updates: &DerivedQuantityUpdate,
    mode: MergeMode,
) -> MergeReport {
    let mut report = MergeReport::default();

    for (code, &quantity) in updates {
        let target = [WorkList::Static, WorkList::Architectural]
            .into_iter()
            .find_map(|list| {
                project
                    .list(list)
                    .iter()
                    .position(|item| item.code == *code)
                    .map(|index| (list, index))
            });

        let Some((list, index)) = target else {
            debug!("No line item carries derived code {code}; skipped");
            report.skipped.push(code.clone());
            continue;
        };

        let item = &mut project.list_mut(list)[index];
        let quantity = non_negative(quantity);
        item.quantity = match mode {
            MergeMode::Accumulate => item.quantity + quantity,
            MergeMode::Replace => quantity,
        };
        report.applied.push((code.clone(), list, item.id.clone()));
    }

    report
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{catalog_entry, catalog_item, manual_draft, project_with_items};

    #[test]
    fn test_validate_manual_draft() {
        assert!(validate_manual_draft(&manual_draft("M.01", 10.0)).is_ok());

        let mut draft = manual_draft("M.01", 10.0);
        draft.code = "   ".to_string();
        assert!(matches!(
            validate_manual_draft(&draft),
            Err(Error::Validation { field: "code", .. })
        ));

        let mut draft = manual_draft("M.01", 10.0);
        draft.unit = String::new();
        assert!(matches!(
            validate_manual_draft(&draft),
            Err(Error::Validation { field: "unit", .. })
        ));

        let mut draft = manual_draft("M.01", 10.0);
        draft.description = String::new();
        assert!(matches!(
            validate_manual_draft(&draft),
            Err(Error::Validation { field: "description", .. })
        ));

        assert!(matches!(
            validate_manual_draft(&manual_draft("M.01", -1.0)),
            Err(Error::InvalidAmount { amount: -1.0 })
        ));
        assert!(matches!(
            validate_manual_draft(&manual_draft("M.01", f64::NAN)),
            Err(Error::InvalidAmount { amount: _ })
        ));
        // zero price is allowed
        assert!(validate_manual_draft(&manual_draft("M.01", 0.0)).is_ok());
    }

    #[test]
    fn test_add_from_catalog_copies_entry() {
        let mut project = Project::default();
        let entry = catalog_entry("15.150.1003", "Hazır beton", "m³", 2450.0);
        let id = add_from_catalog(&mut project, WorkList::Static, &entry, 12.0);

        let (list, item) = project.find_item(&id).unwrap();
        assert_eq!(list, WorkList::Static);
        assert_eq!(item.code, "15.150.1003");
        assert_eq!(item.unit_price, 2450.0);
        assert_eq!(item.source, ItemSource::Catalog);
        assert_eq!(item.amount(), 29400.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let entry = catalog_entry("15.150.1003", "Hazır beton", "m³", 1.0);
        let a = item_from_catalog(&entry, 1.0);
        let b = item_from_catalog(&entry, 1.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_add_manual_rejects_invalid_without_change() {
        let mut project = Project::default();
        let result = add_manual(
            &mut project,
            WorkList::Architectural,
            &manual_draft("", 10.0),
            1.0,
        );
        assert!(result.is_err());
        assert!(project.architectural_items.is_empty());
    }

    #[test]
    fn test_catalog_item_cannot_be_edited_or_deleted() {
        let mut project = project_with_items(vec![catalog_item("c1", "Kaba", 10.0, 5.0)], vec![]);

        assert!(matches!(
            edit_manual_item(&mut project, "c1", &manual_draft("X", 1.0)),
            Err(Error::NotEditable { id: _ })
        ));
        assert!(matches!(
            delete_item(&mut project, "c1"),
            Err(Error::NotDeletable { id: _ })
        ));
        assert_eq!(project.static_items.len(), 1);
        assert_eq!(project.static_items[0].unit_price, 10.0);

        // quantity is still editable
        update_quantity(&mut project, "c1", 8.0).unwrap();
        assert_eq!(project.static_items[0].quantity, 8.0);
    }

    #[test]
    fn test_manual_item_edit_and_delete() {
        let mut project = Project::default();
        let id = add_manual(
            &mut project,
            WorkList::Architectural,
            &manual_draft("M.01", 10.0),
            2.0,
        )
        .unwrap();

        edit_manual_item(&mut project, &id, &manual_draft("M.02", 12.5)).unwrap();
        let (_, item) = project.find_item(&id).unwrap();
        assert_eq!(item.code, "M.02");
        assert_eq!(item.amount(), 25.0);

        // invalid edit leaves the item unchanged
        assert!(edit_manual_item(&mut project, &id, &manual_draft("M.03", -5.0)).is_err());
        assert_eq!(project.find_item(&id).unwrap().1.code, "M.02");

        let removed = delete_item(&mut project, &id).unwrap();
        assert_eq!(removed.id, id);
        assert!(project.architectural_items.is_empty());
    }

    #[test]
    fn test_replace_from_catalog_keeps_quantity() {
        let mut project = project_with_items(vec![catalog_item("c1", "Kaba", 10.0, 5.0)], vec![]);
        let entry = catalog_entry("15.160.1001", "Kalıp", "m²", 300.0);
        replace_from_catalog(&mut project, "c1", &entry).unwrap();

        let item = &project.static_items[0];
        assert_eq!(item.id, "c1");
        assert_eq!(item.code, "15.160.1001");
        assert_eq!(item.quantity, 5.0);
        assert_eq!(item.amount(), 1500.0);
    }

    #[test]
    fn test_update_quantity_rejects_negative_and_unknown() {
        let mut project = project_with_items(vec![catalog_item("c1", "Kaba", 10.0, 5.0)], vec![]);
        assert!(matches!(
            update_quantity(&mut project, "c1", -1.0),
            Err(Error::InvalidAmount { amount: -1.0 })
        ));
        assert!(matches!(
            update_quantity(&mut project, "nope", 1.0),
            Err(Error::LineItemNotFound { id: _ })
        ));
        assert_eq!(project.static_items[0].quantity, 5.0);
    }

    #[test]
    fn test_apply_derived_updates_first_match_and_skip() {
        let mut a = catalog_item("a1", "Doğrama", 100.0, 1.0);
        a.code = "D.1".to_string();
        let mut b = catalog_item("a2", "Doğrama", 100.0, 0.0);
        b.code = "D.1".to_string();
        let mut s = catalog_item("s1", "Kaba", 10.0, 2.0);
        s.code = "D.2".to_string();
        let mut project = project_with_items(vec![s], vec![a, b]);

        let mut updates = DerivedQuantityUpdate::new();
        updates.insert("D.1".to_string(), 3.5);
        updates.insert("MISSING".to_string(), 9.0);
        updates.insert("D.2".to_string(), 4.0);

        let report = apply_derived_updates(&mut project, &updates, MergeMode::Accumulate);

        assert_eq!(project.architectural_items[0].quantity, 4.5);
        assert_eq!(project.architectural_items[1].quantity, 0.0);
        assert_eq!(project.static_items[0].quantity, 6.0);
        assert_eq!(report.skipped, vec!["MISSING".to_string()]);
        assert_eq!(report.applied.len(), 2);
        assert_eq!(report.applied[1].1, WorkList::Static);
    }

    #[test]
    fn test_apply_derived_updates_replace_is_idempotent() {
        let mut a = catalog_item("a1", "Doğrama", 100.0, 7.0);
        a.code = "D.1".to_string();
        let mut project = project_with_items(vec![], vec![a]);
        let mut updates = DerivedQuantityUpdate::new();
        updates.insert("D.1".to_string(), 3.5);

        apply_derived_updates(&mut project, &updates, MergeMode::Replace);
        apply_derived_updates(&mut project, &updates, MergeMode::Replace);
        assert_eq!(project.architectural_items[0].quantity, 3.5);
    }

    #[test]
    fn test_derived_updates_ignore_installation_lists() {
        let mut mech = catalog_item("m1", "Mekanik", 1.0, 0.0);
        mech.code = "D.1".to_string();
        let mut project = Project::default();
        project.mechanical_items.push(mech);

        let mut updates = DerivedQuantityUpdate::new();
        updates.insert("D.1".to_string(), 2.0);
        let report = apply_derived_updates(&mut project, &updates, MergeMode::Accumulate);

        assert_eq!(project.mechanical_items[0].quantity, 0.0);
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn test_tag_and_subcontractor_assignment() {
        let mut project = project_with_items(vec![catalog_item("c1", "Kaba", 10.0, 5.0)], vec![]);
        set_tag(&mut project, "c1", Some(ItemTag::Additional)).unwrap();
        assign_subcontractor(&mut project, "c1", Some("sub-1".to_string())).unwrap();
        let item = &project.static_items[0];
        assert_eq!(item.tag, Some(ItemTag::Additional));
        assert!(item.is_subcontracted());
    }
}
