//! Promotion inputs and eligibility rules.

use common::Money;

#[cfg(doc)]
use crate::domain::Contract;

/// Models the VF3-only promotions are offered for.
const VF3_FAMILY: [&str; 2] = ["VF3", "VF3 nâng cao"];

/// Models the VF5-only promotions are offered for.
const VF5_FAMILY: [&str; 2] = ["VF5 PLUS", "VF5 PLUS Nâng cao"];

/// Promotion inputs of a [`Contract`].
///
/// Six toggles/amounts authored by the salesperson. The derived discount
/// totals are computed by [`pricing`] and never stored here.
///
/// [`pricing`]: super::pricing
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Promotions {
    /// 4%-of-price promotion.
    pub four_percent: bool,

    /// 3%-of-price promotion.
    pub three_percent: bool,

    /// Fixed social program promotion, VF3 family only.
    pub vf3_social: bool,

    /// Two years of free insurance. Carries no price contribution and is
    /// mutually exclusive with [`Promotions::vf3_fixed`] and
    /// [`Promotions::vf5_fixed`].
    pub insurance: bool,

    /// Fixed 6,500,000 VND promotion for the VF3 family.
    pub vf3_fixed: bool,

    /// Fixed 12,000,000 VND promotion for the VF5 family.
    pub vf5_fixed: bool,

    /// Manual discount taken out of the salesperson's commission.
    pub salesperson_discount: Money,

    /// Manual discount granted by the company.
    pub company_discount: Money,
}

impl Promotions {
    /// Sets the given `toggle` to `enabled`, enforcing mutual exclusion.
    ///
    /// Last write wins: the enabling action clears the conflicting flag(s)
    /// at that moment, regardless of what was enabled before.
    pub fn toggle(&mut self, toggle: Toggle, enabled: bool) {
        use Toggle as T;

        match toggle {
            T::FourPercent => self.four_percent = enabled,
            T::ThreePercent => self.three_percent = enabled,
            T::Vf3Social => self.vf3_social = enabled,
            T::Insurance => {
                self.insurance = enabled;
                if enabled {
                    self.vf3_fixed = false;
                    self.vf5_fixed = false;
                }
            }
            T::Vf3Fixed => {
                self.vf3_fixed = enabled;
                if enabled {
                    self.insurance = false;
                }
            }
            T::Vf5Fixed => {
                self.vf5_fixed = enabled;
                if enabled {
                    self.insurance = false;
                }
            }
        }
    }

    /// Clears every toggle that is not offered for the given `model`.
    ///
    /// Run on every model change: a promotion that became ineligible must
    /// not silently keep contributing to the price, nor re-apply when the
    /// model is switched back.
    pub fn clear_ineligible(&mut self, model: &str) {
        use Toggle as T;

        for toggle in
            [T::Vf3Social, T::Insurance, T::Vf3Fixed, T::Vf5Fixed]
        {
            if !toggle.offered_for(model) {
                self.toggle(toggle, false);
            }
        }
    }
}

/// Boolean promotion toggle of [`Promotions`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Toggle {
    /// 4%-of-price promotion.
    FourPercent,

    /// 3%-of-price promotion.
    ThreePercent,

    /// Fixed social program promotion.
    Vf3Social,

    /// Two years of free insurance.
    Insurance,

    /// Fixed 6,500,000 VND promotion.
    Vf3Fixed,

    /// Fixed 12,000,000 VND promotion.
    Vf5Fixed,
}

impl Toggle {
    /// Indicates whether this [`Toggle`] is offered for the given vehicle
    /// `model`.
    #[must_use]
    pub fn offered_for(self, model: &str) -> bool {
        let vf3 = VF3_FAMILY.contains(&model);
        let vf5 = VF5_FAMILY.contains(&model);

        match self {
            Self::FourPercent | Self::ThreePercent => true,
            Self::Vf3Social | Self::Vf3Fixed => vf3,
            Self::Vf5Fixed => vf5,
            Self::Insurance => vf3 || vf5,
        }
    }
}
