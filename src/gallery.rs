//! Built-in seed gallery
//!
//! A fixed set of glyphs offered as starting points. The table is read-only
//! and never written to the saved collection.

use crate::bitgrid::Sprite;

/// Raw seed bitmasks. A few entries carry stray bits above the grid; they
/// are masked off by [`initial_sprites`].
pub const INITIAL_SPRITES: [u32; 179] = [
    17974417, 22369621, 8895426, 15728366, 33553983, 33554431, 22730421, 32537631,
    4685819, 15400945, 2147024575, 15039940, 2129188398, 4685252, 10976718, 10976708,
    9044037, 328000, 15396526, 4540074, 4685802, 18157905, 15396526, 8796552,
    2308290, 21716692, 5698981, 10824010, 30438429, 29215326, 7590276, 2607631,
    18299876, 4347332, 4674692, 4291652, 4488452, 15713855, 22695175, 17245478,
    4488388, 33553742, 33553486, 15154043, 8862152, 4972260, 28490632, 33522659,
    16235627, 4208671, 11371370, 28869179, 2269696, 15724526, 29200721, 15716206,
    32969166, 15025476, 33081322, 15259300, 9422399, 4198670, 4198532, 10634564,
    4539530, 4357258, 15012174, 1030272, 146400, 762592, 29197179, 22696464,
    25301761, 15018318, 4329668, 14749966, 14946574, 4691012, 14956622, 15022158,
    4329742, 15022414, 8665422, 10828100, 6633798, 12650572, 15288910, 14760014,
    2177102, 14988334, 9747753, 14815374, 7508110, 10819914, 14747714, 18405233,
    9745769, 6595878, 2194014, 23373094, 9616687, 16006191, 4329631, 6595881,
    4532785, 10835633, 9738441, 4329809, 15763599, 32652260, 9405410, 32066508,
    4685678, 486848, 1047583, 19286977, 17145262, 33522340, 14832789, 10972618,
    359744, 33095359, 32538052, 24239359, 33093437, 33423227, 9382370, 27070835,
    33553546, 9253704, 15583214, 15714158, 15591278, 15585134, 33539524, 29214254,
    30213219, 4340586, 9437183, 33344152, 15714286, 33543743, 14843012, 11047466,
    15622924, 18125951, 18436895, 15658734, 32471106, 1048014, 4357252, 31744,
    4226052, 1016800, 23068334, 10959310, 786144, 14815935, 33095118, 14842533,
    33095662, 32066512, 12995148, 8521864, 2236546, 33413088, 5224900, 7460636,
    15018980, 28873275, 2193862, 11512810, 32996831, 917034, 18860017, 21504,
    2147342321, 4751908, 33100383,
];

/// The seed gallery as sprites, in table order.
pub fn initial_sprites() -> Vec<Sprite> {
    INITIAL_SPRITES.iter().copied().map(Sprite::from_bits_truncate).collect()
}
