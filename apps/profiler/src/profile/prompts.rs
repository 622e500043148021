// Prompt constants for profile generation.

/// System message sent with every profile request.
pub const PROFILE_SYSTEM: &str = "You are an expert customer analytics specialist who creates \
    detailed, realistic customer profiles.";

/// Profile prompt template. Replace `{first_name}`, `{last_name}`, `{city}` and
/// `{profile_book_data}` before sending.
pub const PROFILE_PROMPT_TEMPLATE: &str = r#"
You are a customer analytics expert. Based on the following information, create a detailed customer profile for {first_name} {last_name} who lives in {city}.

Profile Book Data (if available):
{profile_book_data}

Generate a comprehensive customer profile that includes:

1. **Demographics & Location**: Based on living in {city}
2. **Purchasing Habits**: Create realistic shopping patterns and preferences
3. **Interests & Lifestyle**: Infer interests based on available information and city demographics
4. **Financial Profile**: Generate a realistic credit score (300-850) and spending capacity
5. **Brand Preferences**: Suggest likely brand affinities
6. **Shopping Behavior**: Online vs in-store preferences, seasonal patterns
7. **Communication Preferences**: Preferred channels and messaging style

Make the profile realistic and detailed (2-3 paragraphs), incorporating any professional background or education information from the profile book data if available. If no specific data is available for this person, create a believable profile based on demographic patterns for someone in {city}.

Include a credit score at the end in this format: "Credit Score: XXX"

Respond with just the profile text, no additional formatting or headers.
"#;
