//! Prompt text for deed extraction.

use crate::models::ExtractedDeed;
use std::path::Path;

/// System prompt sent with every extraction request.
pub const SYSTEM_PROMPT: &str = "You are an expert in real estate historical image document analysis. Extract information accurately and completely.";

/// Build the step-by-step extraction prompt for one document.
///
/// The document path is quoted for the model's reference only; the image
/// itself travels as a separate content block.
pub fn build_prompt(image_path: &Path) -> String {
    format!(
        r#"You are analyzing an image of a property document. I'll provide you with the image, and I need you to carefully extract the following content and components:

1. Full Document Content from Image
2. Document Type
3. Grantors & Grantees
4. Legal Authorities
5. Property Descriptions
6. Geographical References
7. Transaction Dates

Let's think through this step by step.

DOCUMENT Path:
```
{path}
```

STEP 0: Extract the Content from the Historical Document
The images are handwritten historical documents, please extract the full text from the image.

STEP 1: Determine the Document Type
First, analyze what kind of document this is. Look for key terms that indicate if this is a deed, easement, mortgage, lien, plan card, etc. Consider the overall structure and purpose of the document.

STEP 2: Identify Grantors & Grantees
Look for sections that indicate who is selling/transferring property (grantors) and who is buying/receiving it (grantees). These are typically found near phrases like "conveyed by," "granted to," "transferred from," etc.

STEP 3: Identify Legal Authorities
Find any judges, witnesses, notaries, or other legal officials mentioned in the document. Look especially in signature blocks, notarization sections, or judicial proceedings.

STEP 4: Extract Property Descriptions
Locate detailed descriptions of the property including acreage, boundaries, lot numbers, etc. These are often in sections with precise measurements and may use surveyor's language.

STEP 5: Collect Geographical References
Identify all mentions of cities, counties, streets, and other location identifiers throughout the document.

STEP 6: Extract Transaction Dates
Find all dates related to the transaction, particularly the execution date, recording date, and any other significant timestamps.

STEP 7: Summarize Findings
Based on the above analysis, provide a structured summary of all components identified.

Please think carefully about each step and provide your findings in a JSON structure with the following format:
```json
{template}
```
"#,
        path = image_path.display(),
        template = ExtractedDeed::template(),
    )
}
