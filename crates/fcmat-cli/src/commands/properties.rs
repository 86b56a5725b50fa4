use fcmat_core::card::composite_key;
use fcmat_core::catalog;

/// Print the property catalog.
///
/// Storage names are printed as full record keys (`Mechanical_YoungsModulus`);
/// display names are printed as labels under their category.
pub fn list_properties(use_display_names: bool) {
    for group in catalog::property_groups(use_display_names) {
        println!("{}", group.category);
        if group.properties.is_empty() {
            println!("  (no predefined properties)");
        }
        for property in group.properties {
            if use_display_names {
                println!("  {}", property);
            } else {
                println!("  {}", composite_key(group.category, property));
            }
        }
    }
}
