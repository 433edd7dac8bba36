//! Built-in region table: the eight divisions of Bangladesh and their
//! district service centers.

pub(super) const DIVISIONS: &[(&str, &str, &[&str])] = &[
    (
        "dhaka",
        "Dhaka Division",
        &[
            "Dhaka",
            "Faridpur",
            "Gazipur",
            "Gopalganj",
            "Kishoreganj",
            "Madaripur",
            "Manikganj",
            "Munshiganj",
            "Narayanganj",
            "Narsingdi",
            "Rajbari",
            "Shariatpur",
            "Tangail",
        ],
    ),
    (
        "chittagong",
        "Chittagong Division",
        &[
            "Bandarban",
            "Brahmanbaria",
            "Chandpur",
            "Chattogram",
            "Cumilla",
            "Cox's Bazar",
            "Feni",
            "Khagrachhari",
            "Lakshmipur",
            "Noakhali",
            "Rangamati",
        ],
    ),
    (
        "khulna",
        "Khulna Division",
        &[
            "Bagerhat",
            "Chuadanga",
            "Jashore",
            "Jhenaidah",
            "Khulna",
            "Kushtia",
            "Magura",
            "Meherpur",
            "Narail",
            "Satkhira",
        ],
    ),
    (
        "rajshahi",
        "Rajshahi Division",
        &[
            "Bogura",
            "Chapainawabganj",
            "Joypurhat",
            "Naogaon",
            "Natore",
            "Pabna",
            "Rajshahi",
            "Sirajganj",
        ],
    ),
    (
        "sylhet",
        "Sylhet Division",
        &["Habiganj", "Moulvibazar", "Sunamganj", "Sylhet"],
    ),
    (
        "barisal",
        "Barisal Division",
        &[
            "Barguna",
            "Barisal",
            "Bhola",
            "Jhalokathi",
            "Patuakhali",
            "Pirojpur",
        ],
    ),
    (
        "rangpur",
        "Rangpur Division",
        &[
            "Dinajpur",
            "Gaibandha",
            "Kurigram",
            "Lalmonirhat",
            "Nilphamari",
            "Panchagarh",
            "Rangpur",
            "Thakurgaon",
        ],
    ),
    (
        "mymensingh",
        "Mymensingh Division",
        &["Jamalpur", "Mymensingh", "Netrokona", "Sherpur"],
    ),
];
