/// Damage dealt by an attack of strength `attack` against `defense`.
///
/// The raw value falls into three bands depending on how the defense
/// compares to the attack:
/// - defense below half the attack: `attack - defense`
/// - defense below the attack: `attack * 5/8 - defense / 4`
/// - otherwise: `attack / 4`
///
/// The raw value is scaled by the element multiplier and rounded up.
pub fn calculate_damage(attack: u32, defense: u32, effectiveness: f64) -> u32 {
    let atk = attack as f64;
    let def = defense as f64;

    let raw = if def < atk / 2.0 {
        atk - def
    } else if def < atk {
        atk * 5.0 / 8.0 - def / 4.0
    } else {
        atk / 4.0
    };

    (raw * effectiveness).ceil().max(0.0) as u32
}
