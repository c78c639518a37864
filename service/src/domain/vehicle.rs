//! [`Vehicle`] catalog definitions.

use std::sync::LazyLock;

use common::Money;

/// Color set shared by every catalog [`Vehicle`].
pub const ALL_COLORS: &[&str] = &[
    "Trắng",
    "Đen",
    "Đỏ",
    "Xanh lá nhạt",
    "Xanh dương",
    "Hồng Phấn",
    "Hồng tím",
    "Vàng",
    "Xám mới",
    "Xám cũ",
    "Bạc",
    "Cam",
];

/// Catalog vehicle model.
#[derive(Clone, Copy, Debug)]
pub struct Vehicle {
    /// Stable catalog ID of this [`Vehicle`].
    pub id: &'static str,

    /// Display name of this [`Vehicle`], used as the model reference in
    /// contracts.
    pub name: &'static str,

    /// Base price of this [`Vehicle`].
    pub price: Money,

    /// Colors this [`Vehicle`] is offered in.
    pub colors: &'static [&'static str],
}

impl Vehicle {
    /// Returns the whole catalog.
    pub fn all() -> &'static [Vehicle] {
        &*CATALOG
    }

    /// Looks up a catalog [`Vehicle`] by its display name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<&'static Vehicle> {
        Self::all().iter().find(|v| v.name == name)
    }

    /// Returns the default catalog entry (the first one).
    #[expect(clippy::missing_panics_doc, reason = "catalog is never empty")]
    #[must_use]
    pub fn default_entry() -> &'static Vehicle {
        Self::all().first().expect("non-empty catalog")
    }

    /// Returns the default color of this [`Vehicle`] (the first one).
    #[expect(clippy::missing_panics_doc, reason = "color set is never empty")]
    #[must_use]
    pub fn default_color(&self) -> &'static str {
        self.colors.first().expect("non-empty color set")
    }

    /// Indicates whether this [`Vehicle`] is offered in the given color.
    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.contains(&color)
    }
}

/// Static catalog of sellable vehicle models.
static CATALOG: LazyLock<[Vehicle; 16]> = LazyLock::new(|| {
    let entry = |id, name, price_vnd| Vehicle {
        id,
        name,
        price: Money::vnd(price_vnd),
        colors: ALL_COLORS,
    };
    [
        entry("VF3", "VF3", 299_000_000),
        entry("VF3_NANGCAO", "VF3 nâng cao", 307_000_000),
        entry("VF5PLUS", "VF5 PLUS", 529_000_000),
        entry("VF5PLUS_NANGCAO", "VF5 PLUS Nâng cao", 529_000_000),
        entry("VF6ECO", "VF6 ECO", 689_000_000),
        entry("VF6PLUS", "VF6 PLUS", 749_000_000),
        entry("VF7ECO_1CAU", "VF7 ECO 1 CẦU", 799_000_000),
        entry("VF7PLUS_TRANTHEP", "VF7 PLUS TRẦN THÉP", 949_000_000),
        entry("VF7PLUS_TRANKINH", "VF7 PLUS TRẦN KÍNH", 969_000_000),
        entry("VF8ECO_SLUX", "VF8 ECO (S Lux)", 1_019_000_000),
        entry("VF8PLUS", "VF8 Plus", 1_199_000_000),
        entry("VF9ECO_7CHO", "VF9 ECO 7 CHỖ", 1_499_000_000),
        entry("VF9PLUS_7CHO", "VF9 PLUS 7 CHỖ", 1_699_000_000),
        entry("VF9PLUS_6CHO", "VF9 PLUS 6 CHỖ", 1_731_000_000),
        entry("HERIO", "HERIO", 499_000_000),
        entry("LIMOGREEN", "LIMOGREEN", 749_000_000),
    ]
});

#[cfg(test)]
mod spec {
    use common::Money;

    use super::Vehicle;

    #[test]
    fn looks_up_by_name() {
        let vf6 = Vehicle::by_name("VF6 ECO").unwrap();
        assert_eq!(vf6.id, "VF6ECO");
        assert_eq!(vf6.price, Money::vnd(689_000_000));

        assert!(Vehicle::by_name("VF6ECO").is_none());
        assert!(Vehicle::by_name("").is_none());
    }

    #[test]
    fn first_entry_is_default() {
        let default = Vehicle::default_entry();
        assert_eq!(default.name, "VF3");
        assert_eq!(default.price, Money::vnd(299_000_000));
        assert_eq!(default.default_color(), "Trắng");
    }

    #[test]
    fn every_entry_offers_its_default_color() {
        for vehicle in Vehicle::all() {
            assert!(vehicle.offers_color(vehicle.default_color()));
        }
    }
}
