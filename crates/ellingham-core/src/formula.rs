// File: crates/ellingham-core/src/formula.rs
// Summary: Typesets chemical formulas with Unicode subscripts.

const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// `4/3 Al + O2 = 2/3 Al2O3` → `4/3 Al + O₂ = 2/3 Al₂O₃`.
///
/// A digit is a subscript when it follows a letter, `)` or another subscript
/// digit; stoichiometric coefficients and fractions are left alone.
pub fn pretty(label: &str) -> String {
    let mut out = String::with_capacity(label.len() + 8);
    let mut prev_subscriptable = false;
    for ch in label.chars() {
        match ch.to_digit(10) {
            Some(d) if prev_subscriptable => {
                out.push(SUBSCRIPTS[d as usize]);
            }
            _ => {
                out.push(ch);
                prev_subscriptable = ch.is_ascii_alphabetic() || ch == ')';
            }
        }
    }
    out
}
