
/// Reporter output and trace toggling.
pub mod reporter;
