// Display helpers shared by handlers and exports.

pub mod date;
