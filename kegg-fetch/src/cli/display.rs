//! Console rendering of records and equations

use kegg_fetch_core::{Equation, EntryKind, EquationTerm, StructuredRecord};

/// Fields shown in the console summary, when the schema includes them
fn summary_fields(kind: EntryKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        EntryKind::Reaction => &[
            ("reaction_id", "ID"),
            ("name", "Name"),
            ("definition", "Definition"),
            ("equation", "Equation"),
            ("is_reversible", "Reversible"),
            ("enzyme", "Enzyme"),
            ("pathways", "Pathways"),
        ],
        EntryKind::Compound => &[
            ("compound_id", "ID"),
            ("name", "Name"),
            ("formula", "Formula"),
            ("exact_mass", "Exact Mass"),
            ("molecular_weight", "Molecular Weight"),
            ("pathways", "Pathways"),
        ],
    }
}

/// Render the summary block for one record
pub fn format_record(record: &StructuredRecord) -> String {
    let title = match record.kind() {
        EntryKind::Reaction => "Reaction Details:",
        EntryKind::Compound => "Compound Details:",
    };

    let mut out = format!("\n{}\n", title);
    for (field, label) in summary_fields(record.kind()) {
        if let Some(value) = record.get(field) {
            out.push_str(&format!("{}: {}\n", label, value.to_cell()));
        }
    }
    out.push_str(&"-".repeat(80));
    out
}

pub fn print_record(record: &StructuredRecord) {
    println!("{}", format_record(record));
}

fn format_side(terms: &[EquationTerm]) -> String {
    if terms.is_empty() {
        return "  (none)".to_string();
    }
    terms
        .iter()
        .map(|t| format!("  {:>3} x {}", t.coefficient, t.identifier))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a decoded equation for the console
pub fn format_equation(equation: &Equation) -> String {
    if equation.is_empty() {
        return "No equation could be decoded".to_string();
    }

    format!(
        "Reactants:\n{}\nProducts:\n{}\nReversible: {}",
        format_side(&equation.reactants),
        format_side(&equation.products),
        equation.reversible
    )
}
