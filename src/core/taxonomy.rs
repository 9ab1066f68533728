use grcalc_derive::Labelled;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// The two element families. A calculator kind only ever uses one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Labelled)]
pub enum ElementFamily {
    Standard,
    /// External works ("mini" calculator) elements
    ExternalWorks,
}

/// A physical building component that can be priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Labelled)]
pub enum Element {
    // Standard structural elements
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    CarpentryAndJoineryFittedKitchen,
    CarpentryAndJoineryBuiltInCupboards,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    AirConditioning,
    FireProtection,
    Lifts,
    Escalators,
    CarPort,
    Veranda,
    // External works
    BoundaryWall,
    Gate,
    SwimmingPool,
    Paving,
    Fencing,
    Landscaping,
    Borehole,
    SepticTank,
}

impl Element {
    pub fn family(self) -> ElementFamily {
        match self {
            Element::BoundaryWall
            | Element::Gate
            | Element::SwimmingPool
            | Element::Paving
            | Element::Fencing
            | Element::Landscaping
            | Element::Borehole
            | Element::SepticTank => ElementFamily::ExternalWorks,
            _ => ElementFamily::Standard,
        }
    }

    /// Material/specification choices valid for this element.
    ///
    /// An empty slice means the element is priced by its own label.
    pub fn options(self) -> &'static [PropertyOption] {
        use PropertyOption::*;
        match self {
            Element::Foundations | Element::Plumbing => &[],
            Element::Concrete => &[ConcreteSurfaceBed, ConcreteSuspendedSlab],
            Element::Brickwork => &[StockBricks, FaceBricks, CementBricks, ConcreteBlocks],
            Element::Plastering => &[PlasterInternalOnly, PlasterInternalAndExternal],
            Element::RoofingStructure => &[TimberTrusses, SteelTrusses, ConcreteRoofSlab],
            Element::RoofingCover => &[
                CorrugatedIronSheeting,
                IbrSheeting,
                ConcreteTiles,
                ClayTiles,
                Thatch,
            ],
            Element::Ceilings => &[NoCeiling, PlasterboardCeiling, SuspendedCeiling],
            Element::FloorFinishes => &[
                CementScreed,
                CeramicTiles,
                PorcelainTiles,
                Carpets,
                LaminatedFlooring,
            ],
            Element::Painting => &[PvaPaint, EnamelPaint],
            Element::Windows => &[SteelWindows, AluminiumWindows, TimberWindows],
            Element::Doors => &[HollowCoreDoors, SolidCoreDoors, SteelDoors],
            Element::CarpentryAndJoineryFittedKitchen => {
                &[StandardKitchenUnits, CustomKitchenUnits]
            }
            Element::CarpentryAndJoineryBuiltInCupboards => &[MelamineCupboards, TimberCupboards],
            Element::SanitaryFittings => &[StandardBathroom, LuxuryBathroom],
            Element::ElectricalInstallation => &[SinglePhaseElectrical, ThreePhaseElectrical],
            Element::AirConditioning => &[SplitUnits, CentralHvac],
            Element::FireProtection => &[FireHoseReels, SprinklerSystem],
            Element::Lifts => &[PassengerLift, GoodsLift],
            Element::Escalators => &[Escalator],
            Element::CarPort => &[ShadeNetCarPort, SteelCarPort],
            Element::Veranda => &[ConcreteVeranda, TiledVeranda],
            Element::BoundaryWall => &[BrickBoundaryWall, ConcreteBlockBoundaryWall, PrecastWall],
            Element::Gate => &[SlidingGate, SwingGate, PedestrianGate],
            Element::SwimmingPool => &[FibreglassPool, ConcretePool],
            Element::Paving => &[ConcretePavers, BrickPaving, Tarmac],
            Element::Fencing => &[DiamondMeshFence, ClearViewFence, PalisadeFence],
            Element::Landscaping => &[BasicLandscaping, IrrigatedLandscaping],
            Element::Borehole => &[EquippedBorehole],
            Element::SepticTank => &[SepticTankAndSoakaway],
        }
    }

    pub fn accepts(self, option: PropertyOption) -> bool {
        self.options().contains(&option)
    }

    /// Label of the user-entered quantity that replaces floor area for
    /// per-unit elements.
    pub fn multiplier_prompt(self) -> Option<&'static str> {
        match self {
            Element::SanitaryFittings => Some("Enter number of bathrooms"),
            Element::Lifts => Some("Enter number of lifts"),
            Element::Escalators => Some("Enter number of escalators"),
            Element::CarPort => Some("Enter car-port area"),
            Element::BoundaryWall => Some("Enter wall length"),
            Element::SwimmingPool => Some("Enter pool area"),
            Element::Paving => Some("Enter paved area"),
            Element::Fencing => Some("Enter fence length"),
            Element::Landscaping => Some("Enter landscaped area"),
            Element::Borehole => Some("Enter number of boreholes"),
            _ => None,
        }
    }
}

/// Material or specification choice; its label is the rate-table join key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Labelled)]
pub enum PropertyOption {
    ConcreteSurfaceBed,
    ConcreteSuspendedSlab,
    StockBricks,
    FaceBricks,
    CementBricks,
    ConcreteBlocks,
    PlasterInternalOnly,
    PlasterInternalAndExternal,
    TimberTrusses,
    SteelTrusses,
    ConcreteRoofSlab,
    CorrugatedIronSheeting,
    IbrSheeting,
    ConcreteTiles,
    ClayTiles,
    Thatch,
    NoCeiling,
    PlasterboardCeiling,
    SuspendedCeiling,
    CementScreed,
    CeramicTiles,
    PorcelainTiles,
    Carpets,
    LaminatedFlooring,
    PvaPaint,
    EnamelPaint,
    SteelWindows,
    AluminiumWindows,
    TimberWindows,
    HollowCoreDoors,
    SolidCoreDoors,
    SteelDoors,
    StandardKitchenUnits,
    CustomKitchenUnits,
    MelamineCupboards,
    TimberCupboards,
    StandardBathroom,
    LuxuryBathroom,
    SinglePhaseElectrical,
    ThreePhaseElectrical,
    SplitUnits,
    CentralHvac,
    FireHoseReels,
    SprinklerSystem,
    PassengerLift,
    GoodsLift,
    Escalator,
    ShadeNetCarPort,
    SteelCarPort,
    ConcreteVeranda,
    TiledVeranda,
    BrickBoundaryWall,
    ConcreteBlockBoundaryWall,
    PrecastWall,
    SlidingGate,
    SwingGate,
    PedestrianGate,
    FibreglassPool,
    ConcretePool,
    ConcretePavers,
    BrickPaving,
    Tarmac,
    DiamondMeshFence,
    ClearViewFence,
    PalisadeFence,
    BasicLandscaping,
    IrrigatedLandscaping,
    EquippedBorehole,
    SepticTankAndSoakaway,
}

/// Ordinal finish grade of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Labelled)]
pub enum QualityOfFinish {
    Delapidated,
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
    NotApplicable,
}

impl QualityOfFinish {
    /// Weight applied to the typical estimate to get the quality estimate.
    pub fn weight(self) -> Decimal {
        match self {
            QualityOfFinish::Delapidated => dec!(0.6),
            QualityOfFinish::Poor => dec!(0.7),
            QualityOfFinish::Fair => dec!(0.8),
            QualityOfFinish::Good => dec!(0.85),
            QualityOfFinish::VeryGood => dec!(0.9),
            QualityOfFinish::Excellent | QualityOfFinish::NotApplicable => dec!(1.0),
        }
    }
}

/// Age cohort of the building; selects one of the three rate columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Labelled)]
pub enum DevelopmentYearBracket {
    First,
    Second,
    Third,
}

/// Building archetype. Governs which elements apply and which rates are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Labelled)]
pub enum CalculatorKind {
    #[label = "Residential_SS_up_to_100m2"]
    ResidentialSingleStoreyUpTo100,
    #[label = "Residential_SS_100m2_to_250m2"]
    ResidentialSingleStorey100To250,
    #[label = "Residential_SS_over_250m2"]
    ResidentialSingleStoreyOver250,
    #[label = "Residential_Double_Storey"]
    ResidentialDoubleStorey,
    #[label = "Residential_Flats"]
    ResidentialFlats,
    #[label = "Townhouses"]
    Townhouses,
    #[label = "SHHA_House_Types"]
    ShhaHouseTypes,
    #[label = "Outbuilding"]
    Outbuilding,
    #[label = "Guest_House"]
    GuestHouse,
    #[label = "Office_Low_Rise"]
    OfficeLowRise,
    #[label = "Office_High_Rise"]
    OfficeHighRise,
    #[label = "Retail_Shop"]
    RetailShop,
    #[label = "Shopping_Mall"]
    ShoppingMall,
    #[label = "Bank"]
    Bank,
    #[label = "Restaurant"]
    Restaurant,
    #[label = "Hotel"]
    Hotel,
    #[label = "Lodge"]
    Lodge,
    #[label = "Warehouse"]
    Warehouse,
    #[label = "Factory_Light_Industrial"]
    FactoryLightIndustrial,
    #[label = "Filling_Station"]
    FillingStation,
    #[label = "Hospital"]
    Hospital,
    #[label = "Clinic"]
    Clinic,
    #[label = "School"]
    School,
    #[label = "Church"]
    Church,
    #[label = "Sports_Complex"]
    SportsComplex,
    #[label = "Boundary_Wall"]
    BoundaryWall,
    #[label = "External_Works_Residential"]
    ExternalWorksResidential,
}

impl CalculatorKind {
    /// Element family this kind draws its whitelist from.
    pub fn family(self) -> ElementFamily {
        match self {
            CalculatorKind::BoundaryWall | CalculatorKind::ExternalWorksResidential => {
                ElementFamily::ExternalWorks
            }
            _ => ElementFamily::Standard,
        }
    }
}
