//! Fixed prompt and default analysis text.

/// The prompt sent to the vision model for every coin photo.
pub const COIN_PROMPT: &str = "\
You are a numismatics expert. Analyze the coin in this image and provide an \
educational description. Structure your answer as numbered sections, each \
followed by dash-prefixed fields, for example:

1. Coin Identification:
- Country: ...
- Denomination: ...
- Year: ...
2. Physical Characteristics:
- Metal: ...
- Edge: ...
3. Historical Context:
- ...

If any detail cannot be determined from the photo, say so in the relevant \
field rather than guessing. Keep the whole answer under 300 words.";

/// Analysis shown at startup for the bundled sample coin, before any
/// analyzer call has been made.
pub const DEFAULT_ANALYSIS: &str = "\
1. Coin Identification:
- Country: United States
- Denomination: One Dollar
- Year: 1921
- Type: Morgan Silver Dollar
2. Physical Characteristics:
- Metal: 90% silver, 10% copper
- Diameter: 38.1 mm
- Edge: Reeded (ridged)
3. Design Details:
- Obverse: Liberty head facing left, surrounded by stars and the date
- Reverse: Eagle with outstretched wings clutching arrows and an olive branch
4. Historical Context:
- The Morgan dollar was struck from 1878 to 1904 and again in 1921, its final year.
- 1921 saw the largest mintage of the entire series across three mints.
Upload a photo of your own coin to get a fresh analysis.";
