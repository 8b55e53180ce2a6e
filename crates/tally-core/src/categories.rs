//! Fixed expense category catalog
//!
//! The catalog is an enumerated set of category ids, display names, and
//! subcategory lists. It is loaded once at process start and read-only for
//! the lifetime of the process; services that need it own or borrow a
//! [`CategoryRegistry`] rather than reaching for a global.

use std::collections::HashMap;

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub subcategories: &'static [&'static str],
}

const CATALOG: &[Category] = &[
    // Basic necessities
    Category {
        id: "food",
        name: "Food & Dining",
        subcategories: &[
            "Groceries",
            "Restaurants",
            "Takeout",
            "Coffee Shops",
            "Fast Food",
            "Snacks",
        ],
    },
    Category {
        id: "housing",
        name: "Housing",
        subcategories: &[
            "Rent",
            "Mortgage",
            "Property Tax",
            "Home Insurance",
            "Maintenance",
            "Utilities",
            "Furniture",
            "Home Decor",
        ],
    },
    Category {
        id: "transport",
        name: "Transportation",
        subcategories: &[
            "Car Payment",
            "Car Insurance",
            "Gas",
            "Public Transit",
            "Ride Sharing",
            "Parking",
            "Maintenance",
            "Tolls",
        ],
    },
    // Personal care
    Category {
        id: "health",
        name: "Health & Medical",
        subcategories: &[
            "Doctor Visits",
            "Dentist",
            "Pharmacy",
            "Health Insurance",
            "Fitness",
            "Supplements",
            "Medical Devices",
        ],
    },
    Category {
        id: "personal_care",
        name: "Personal Care",
        subcategories: &[
            "Haircuts",
            "Cosmetics",
            "Toiletries",
            "Spa",
            "Beauty Products",
            "Personal Hygiene",
        ],
    },
    // Lifestyle
    Category {
        id: "shopping",
        name: "Shopping",
        subcategories: &[
            "Clothing",
            "Electronics",
            "Books",
            "Gifts",
            "Home Goods",
            "Accessories",
        ],
    },
    Category {
        id: "entertainment",
        name: "Entertainment",
        subcategories: &[
            "Movies",
            "Streaming Services",
            "Concerts",
            "Events",
            "Games",
            "Hobbies",
            "Subscriptions",
        ],
    },
    // Financial
    Category {
        id: "financial",
        name: "Financial",
        subcategories: &[
            "Investments",
            "Savings",
            "Loans",
            "Credit Cards",
            "Bank Fees",
            "Taxes",
        ],
    },
    Category {
        id: "insurance",
        name: "Insurance",
        subcategories: &[
            "Life Insurance",
            "Health Insurance",
            "Car Insurance",
            "Home Insurance",
            "Travel Insurance",
        ],
    },
    // Education & work
    Category {
        id: "education",
        name: "Education",
        subcategories: &[
            "Tuition",
            "Books",
            "Courses",
            "Software",
            "Equipment",
            "Certifications",
        ],
    },
    Category {
        id: "work",
        name: "Work Expenses",
        subcategories: &[
            "Office Supplies",
            "Professional Development",
            "Business Travel",
            "Work Equipment",
            "Business Meals",
        ],
    },
    // Travel & leisure
    Category {
        id: "travel",
        name: "Travel",
        subcategories: &[
            "Flights",
            "Hotels",
            "Vacation",
            "Travel Insurance",
            "Souvenirs",
            "Local Transport",
        ],
    },
    Category {
        id: "leisure",
        name: "Leisure",
        subcategories: &[
            "Sports",
            "Fitness",
            "Outdoor Activities",
            "Memberships",
            "Equipment",
        ],
    },
    // Technology
    Category {
        id: "technology",
        name: "Technology",
        subcategories: &[
            "Devices",
            "Software",
            "Apps",
            "Internet",
            "Phone Bill",
            "Tech Accessories",
        ],
    },
    // Miscellaneous
    Category {
        id: "charity",
        name: "Charity & Donations",
        subcategories: &[
            "Donations",
            "Charity Events",
            "Fundraising",
            "Volunteer Expenses",
        ],
    },
    Category {
        id: "pets",
        name: "Pets",
        subcategories: &["Food", "Vet", "Grooming", "Toys", "Pet Insurance", "Supplies"],
    },
    Category {
        id: "other",
        name: "Other",
        subcategories: &["Miscellaneous", "Uncategorized"],
    },
];

/// Read-only lookup over the fixed catalog
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    index: HashMap<&'static str, usize>,
}

impl CategoryRegistry {
    /// Load the built-in catalog
    pub fn builtin() -> Self {
        let index = CATALOG
            .iter()
            .enumerate()
            .map(|(i, category)| (category.id, i))
            .collect();
        Self { index }
    }

    /// All categories in catalog order
    pub fn list(&self) -> &'static [Category] {
        CATALOG
    }

    /// All category ids in catalog order
    pub fn ids(&self) -> impl Iterator<Item = &'static str> {
        CATALOG.iter().map(|category| category.id)
    }

    pub fn get(&self, id: &str) -> Option<&'static Category> {
        self.index.get(id).map(|&i| &CATALOG[i])
    }

    pub fn is_valid(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Display name for a category id, falling back to the raw id for
    /// anything not in the catalog
    pub fn display_name<'a>(&self, id: &'a str) -> &'a str {
        self.get(id).map(|category| category.name).unwrap_or(id)
    }

    pub fn is_valid_subcategory(&self, id: &str, subcategory: &str) -> bool {
        self.get(id)
            .map(|category| category.subcategories.contains(&subcategory))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        CATALOG.len()
    }

    pub fn is_empty(&self) -> bool {
        CATALOG.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
