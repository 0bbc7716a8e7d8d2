/// Amount gained per harvest and credited per deposit.
pub const HARVEST_QUANTUM: u32 = 100;

/// Gold spent by the townhall to produce one peasant.
pub const PEASANT_GOLD_COST: u32 = 400;

/// Maximum number of simultaneous workers.
pub const POPULATION_CAP: usize = 3;
