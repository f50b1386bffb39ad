//! Component catalog.
//!
//! Every (use-case, tier) pair maps to a fixed `ComponentBundle`. Part lists
//! are kept in Rust constants so a typo or a missing slot fails a test
//! instead of surfacing in the wizard.
//!
//! | Use-case    | Entry | Mid  | High |
//! |-------------|-------|------|------|
//! | Gaming      | 1000  | 1500 | 3000 |
//! | Workstation | 1200  | 2000 | 5000 |
//!
//! The first option of each slot is the recommended default.

mod summary;

pub use summary::{PerformanceSummary, COMPATIBILITY_NOTES};

use crate::error::{BuildError, Result};
use crate::types::{Slot, Tier, UseCase};
use tracing::debug;

/// Ordered, non-empty list of acceptable parts for one slot
pub type Options = &'static [&'static str];

/// The fixed set of slot options and reference price for one catalog key.
#[derive(Debug, PartialEq, Eq)]
pub struct ComponentBundle {
    pub use_case: UseCase,
    pub tier: Tier,
    /// Options indexed by `Slot::index()`
    slots: [Options; Slot::COUNT],
    /// Reference price in whole US dollars
    pub price: u32,
    pub summary: PerformanceSummary,
}

impl ComponentBundle {
    /// Options for a slot, recommended part first
    pub fn options(&self, slot: Slot) -> Options {
        self.slots[slot.index()]
    }

    /// Recommended part for a slot
    pub fn recommended(&self, slot: Slot) -> &'static str {
        // Every slot list is non-empty (checked by tests over the whole catalog)
        self.options(slot).first().copied().unwrap_or_default()
    }

    /// Slots paired with their options, in display order
    pub fn slots(&self) -> impl Iterator<Item = (Slot, Options)> + '_ {
        Slot::all().map(move |slot| (slot, self.options(slot)))
    }

    /// Short display name, e.g. "Mid Gaming"
    pub fn title(&self) -> String {
        format!("{} {}", self.tier, self.use_case)
    }
}

static CATALOG: [ComponentBundle; 6] = [
    ComponentBundle {
        use_case: UseCase::Gaming,
        tier: Tier::Entry,
        slots: [
            &["AMD Ryzen 5 5600X", "Intel i5-12400F"],
            &["RTX 3060", "RX 6600"],
            &["16GB DDR4 3200MHz"],
            &["1TB NVMe SSD"],
            &["B550", "B660"],
            &["650W 80+ Gold"],
            &["NZXT H510", "Phanteks P300"],
        ],
        price: 1000,
        summary: PerformanceSummary::Gaming {
            fps_1440p: "80+",
            ray_tracing: "Basic",
        },
    },
    ComponentBundle {
        use_case: UseCase::Gaming,
        tier: Tier::Mid,
        slots: [
            &["AMD Ryzen 7 5800X3D", "Intel i7-13700K"],
            &["RTX 4070", "RX 7800 XT"],
            &["32GB DDR4 3600MHz"],
            &["2TB NVMe SSD"],
            &["X570", "Z690"],
            &["750W 80+ Gold"],
            &["Lian Li Lancool II", "Fractal Design Meshify 2"],
        ],
        price: 1500,
        summary: PerformanceSummary::Gaming {
            fps_1440p: "144+",
            ray_tracing: "Good",
        },
    },
    ComponentBundle {
        use_case: UseCase::Gaming,
        tier: Tier::High,
        slots: [
            &["AMD Ryzen 9 7950X3D", "Intel i9-14900K"],
            &["RTX 4090", "RX 7900 XTX"],
            &["32GB DDR5 6000MHz"],
            &["2TB NVMe Gen4"],
            &["X670E", "Z790"],
            &["1000W 80+ Platinum"],
            &["Lian Li O11", "Phanteks Evolv X"],
        ],
        price: 3000,
        summary: PerformanceSummary::Gaming {
            fps_1440p: "200+",
            ray_tracing: "Best",
        },
    },
    ComponentBundle {
        use_case: UseCase::Workstation,
        tier: Tier::Entry,
        slots: [
            &["AMD Ryzen 7 5800X", "Intel i7-12700"],
            &["RTX 4060", "RX 6800"],
            &["32GB DDR4 3600MHz"],
            &["2TB NVMe SSD"],
            &["B550", "B660"],
            &["750W 80+ Gold"],
            &["Fractal Design Meshify C", "be quiet! Pure Base 500"],
        ],
        price: 1200,
        summary: PerformanceSummary::Workstation {
            render_score: "85/100",
            workload: "Medium",
        },
    },
    ComponentBundle {
        use_case: UseCase::Workstation,
        tier: Tier::Mid,
        slots: [
            &["AMD Ryzen 9 7900X", "Intel i9-13900K"],
            &["RTX 4070 Ti", "RX 7900 XT"],
            &["64GB DDR5 5600MHz"],
            &["4TB NVMe SSD"],
            &["X670", "Z690"],
            &["850W 80+ Platinum"],
            &["be quiet! Silent Base 802", "Fractal Design Define 7"],
        ],
        price: 2000,
        summary: PerformanceSummary::Workstation {
            render_score: "92/100",
            workload: "Heavy",
        },
    },
    ComponentBundle {
        use_case: UseCase::Workstation,
        tier: Tier::High,
        slots: [
            &["AMD Threadripper 7980X", "Intel Xeon W9-3495X"],
            &["RTX 4090", "2x RTX 4080"],
            &["128GB DDR5 6400MHz"],
            &["8TB NVMe RAID"],
            &["WRX90", "W790"],
            &["1600W 80+ Titanium"],
            &["Phanteks Enthoo 719", "Lian Li V3000+"],
        ],
        price: 5000,
        summary: PerformanceSummary::Workstation {
            render_score: "98/100",
            workload: "Extreme",
        },
    },
];

/// Look up the bundle for a (use-case, tier) pair.
///
/// A miss means the static table is out of sync with the enumerations; it
/// is reported as `BuildError::NotFound` rather than a panic so the wizard
/// can still show it.
pub fn lookup(use_case: UseCase, tier: Tier) -> Result<&'static ComponentBundle> {
    debug!("Catalog lookup: {} {}", tier, use_case);
    CATALOG
        .iter()
        .find(|bundle| bundle.use_case == use_case && bundle.tier == tier)
        .ok_or(BuildError::NotFound { use_case, tier })
}

/// All bundles, grouped by use-case then ordered by tier
pub fn bundles() -> impl Iterator<Item = &'static ComponentBundle> {
    CATALOG.iter()
}

/// All bundles for one use-case, cheapest first
pub fn bundles_for(use_case: UseCase) -> impl Iterator<Item = &'static ComponentBundle> {
    CATALOG.iter().filter(move |bundle| bundle.use_case == use_case)
}

/// Performance summary for a catalog key
pub fn summary(use_case: UseCase, tier: Tier) -> Result<PerformanceSummary> {
    lookup(use_case, tier).map(|bundle| bundle.summary)
}

/// Format whole dollars with thousands separators, e.g. `$1,500`
pub fn format_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
