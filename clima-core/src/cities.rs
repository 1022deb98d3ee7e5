/// Label of the "nothing selected" entry in the city selector.
pub const PLACEHOLDER: &str = "Seleccione una ciudad";

/// Main Colombian cities offered by the selector, in display order.
pub const CITIES: &[&str] = &[
    "Bogotá",
    "Medellín",
    "Cali",
    "Barranquilla",
    "Cartagena",
    "Cúcuta",
    "Bucaramanga",
    "Pereira",
    "Santa Marta",
    "Ibagué",
    "Pasto",
    "Manizales",
    "Neiva",
    "Villavicencio",
    "Armenia",
    "Valledupar",
    "Montería",
    "Sincelejo",
    "Popayán",
    "Tunja",
    "Riohacha",
    "Quibdó",
    "Florencia",
    "Leticia",
];

/// Case-insensitive check against [`CITIES`].
pub fn is_listed(name: &str) -> bool {
    let wanted = name.trim().to_lowercase();
    CITIES.iter().any(|city| city.to_lowercase() == wanted)
}
