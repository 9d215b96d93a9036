use inaddr::phone::clean_indian_phone;
use inaddr::{AddressParser, ReferenceDataBuilder};

fn main() -> inaddr::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional reference files; missing ones are skipped with a warning.
    let reference = ReferenceDataBuilder::with_defaults()
        .pincode_csv_file("data/pincodes.csv")?
        .city_state_csv_file("data/cities_states.csv")?
        .pincode("834086", "JHARKHAND")
        .build();
    let parser = AddressParser::with_reference(reference);

    println!("=== Address parsing ===\n");

    let test_cases = vec![
        // unit identifier
        "B-177 ; Green Heights ; MG Extn ; Nagar 84 ; B/H Hospital ; Mangaluru ; Karnataka ; 575073",
        "D-198, Sunrise Apartments, Sector 5 ; Ghaziabad ; Uttar Pradesh ; 201001",
        // landmark
        "Flat 754 - Orchid Plaza - College Road - Colony 37 - Near Metro Stn - Ahmedabad - Gujarat - 380012",
        "Shop 9, Opp City Mall ; Jaipur ; Rajasthan 302001",
        // state from pincode
        "8/4 ; Silver CHS ; Enclave 92 ; Ranchi ; 834086",
        // nothing recognisable
        "some random text",
        "",
    ];

    for addr in test_cases {
        let r = parser.parse(addr);
        println!("input: \"{}\"", addr);
        for (name, value) in r.fields() {
            println!("  {:15} {:?}", name, value);
        }
        println!("  complete: {}", r.is_complete());
        println!();
    }

    println!("=== Phone normalization ===\n");

    let phones = [
        "9876543210",
        "+91 98765 43210",
        "(+91) 9876543210",
        "Call me at 09876543210",
        "5876543210",
        "invalid123",
    ];

    for p in phones {
        match clean_indian_phone(p) {
            Some(cleaned) => println!("{:28} => {}", format!("{:?}", p), cleaned),
            None => println!("{:28} => invalid", format!("{:?}", p)),
        }
    }

    Ok(())
}
